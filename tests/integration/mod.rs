pub mod helpers;

mod budget;
mod scenarios;
