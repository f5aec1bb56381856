pub mod main_cache;
