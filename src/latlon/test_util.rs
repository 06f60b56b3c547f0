use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seed shared by tests that want a reproducible random source.
pub const TEST_SEED: u64 = 0x5eed_cafe;

// test_rng returns a deterministic random source for tests.
pub fn test_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

// init_tracing routes tracing output to the test harness. Safe to call from
// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[macro_export]
macro_rules! assert_eq_with_callout {
    // Basic version with default assertion text
    ($x:expr, $y:expr) => {
        $crate::assert_eq_with_callout!($x, $y, "relation mismatch: ");
    };

    // With custom error message
    ($x:expr, $y:expr, $msg:expr) => {
        let got = $x;
        let want = $y;
        if got != want {
            panic!(
                concat!("{}\n", "Got:  {}\n", "Want: {}\n", "NOT EQUAL!"),
                $msg, got, want,
            );
        }
    };
}
