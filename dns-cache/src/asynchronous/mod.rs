pub mod async_main_cache;
