/// Version string shown by `budget --version`, with metadata captured by `build.rs`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SIMPLE_BUDGET_BUILD_HASH"),
    ", ",
    env!("SIMPLE_BUDGET_BUILD_STATUS"),
    ")\nbuilt ",
    env!("SIMPLE_BUDGET_BUILD_TIMESTAMP"),
    " for ",
    env!("SIMPLE_BUDGET_BUILD_TARGET"),
);
