pub mod fixtures;

mod workflow;
