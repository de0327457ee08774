//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pokereview_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("pokereview_core ping={}", pokereview_core::ping());
    println!("pokereview_core version={}", pokereview_core::core_version());
}
