pub mod db;
pub mod loader;
pub mod settings;
pub mod showcase;
pub mod watcher;
