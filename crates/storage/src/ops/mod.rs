pub mod block_cache;
