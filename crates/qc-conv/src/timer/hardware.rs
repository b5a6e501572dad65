//! Platform cycle counters.
//!
//! | target    | opening read           | closing read            |
//! |-----------|------------------------|-------------------------|
//! | x86_64    | `lfence; rdtsc; lfence`| `rdtscp; lfence`        |
//! | aarch64   | `isb; mrs cntvct_el0`  | `isb; mrs cntvct_el0`   |
//! | riscv64   | `fence; rdcycle`       | `fence; rdcycle`        |
//! | otherwise | monotonic clock in ns, bracketed by `SeqCst` fences |
//!
//! Every read is also wrapped in compiler fences so the optimizer cannot
//! hoist or sink memory operations across it.

use std::sync::atomic::{compiler_fence, Ordering};

use super::CycleCounter;

/// Reads the platform's hardware cycle counter.
#[derive(Debug, Clone, Default)]
pub struct HardwareCounter;

impl HardwareCounter {
    pub fn new() -> Self {
        HardwareCounter
    }
}

impl CycleCounter for HardwareCounter {
    fn name(&self) -> &str {
        arch::NAME
    }

    fn start_read(&mut self) -> u64 {
        compiler_fence(Ordering::SeqCst);
        let t = arch::start_read();
        compiler_fence(Ordering::SeqCst);
        t
    }

    fn stop_read(&mut self) -> u64 {
        compiler_fence(Ordering::SeqCst);
        let t = arch::stop_read();
        compiler_fence(Ordering::SeqCst);
        t
    }
}

#[cfg(target_arch = "x86_64")]
mod arch {
    use std::arch::x86_64::{__rdtscp, _mm_lfence, _rdtsc};

    pub const NAME: &str = "rdtsc";

    #[allow(unused_unsafe)]
    pub fn start_read() -> u64 {
        // SAFETY: lfence and rdtsc are baseline x86_64 instructions.
        unsafe {
            _mm_lfence();
            let t = _rdtsc();
            _mm_lfence();
            t
        }
    }

    #[allow(unused_unsafe)]
    pub fn stop_read() -> u64 {
        let mut aux = 0u32;
        // SAFETY: rdtscp waits for all prior instructions to retire; the
        // trailing lfence keeps later instructions from starting early.
        unsafe {
            let t = __rdtscp(&mut aux);
            _mm_lfence();
            t
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod arch {
    use std::arch::asm;

    pub const NAME: &str = "cntvct";

    fn read() -> u64 {
        let t: u64;
        // SAFETY: cntvct_el0 is readable from EL0 on every supported OS.
        unsafe {
            asm!("isb", "mrs {t}, cntvct_el0", t = out(reg) t, options(nostack));
        }
        t
    }

    pub fn start_read() -> u64 {
        read()
    }

    pub fn stop_read() -> u64 {
        read()
    }
}

#[cfg(target_arch = "riscv64")]
mod arch {
    use std::arch::asm;

    pub const NAME: &str = "rdcycle";

    fn read() -> u64 {
        let t: u64;
        // SAFETY: rdcycle reads the user-level cycle CSR.
        unsafe {
            asm!("fence", "rdcycle {t}", t = out(reg) t, options(nostack));
        }
        t
    }

    pub fn start_read() -> u64 {
        read()
    }

    pub fn stop_read() -> u64 {
        read()
    }
}

#[cfg(not(any(
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv64"
)))]
mod arch {
    use std::sync::atomic::{fence, Ordering};
    use std::sync::OnceLock;
    use std::time::Instant;

    pub const NAME: &str = "monotonic-ns";

    static EPOCH: OnceLock<Instant> = OnceLock::new();

    fn read() -> u64 {
        fence(Ordering::SeqCst);
        let t = EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64;
        fence(Ordering::SeqCst);
        t
    }

    pub fn start_read() -> u64 {
        read()
    }

    pub fn stop_read() -> u64 {
        read()
    }
}
