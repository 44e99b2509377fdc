pub mod plugin_dir;
