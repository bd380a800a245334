/// Use mimalloc as the global allocator for all binaries.
/// Word sets allocate one small String per distinct word per chunk,
/// which is exactly the workload mimalloc's thread-local caches favour.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod uwc;
