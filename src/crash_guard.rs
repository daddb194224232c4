// SPDX-License-Identifier: MIT

//! Converts hard faults raised by driver code (access violations, bus
//! errors, floating point exceptions, stack exhaustion) into a typed
//! result instead of taking the whole process down.
//!
//! Ported from `original_source/src/core/crash_guard.cpp`'s Unix path:
//! a `sigaction`-installed handler `siglongjmp`s back to a
//! `sigsetjmp` planted immediately before the guarded call. Installation
//! and removal is scoped to each call, and the handler only acts while a
//! thread-local flag says a guard is active, so a crash on a thread with
//! no guard installed still terminates the process as it should.

use libc::{c_int, sigaction, sighandler_t, stack_t, SA_ONSTACK, SIGBUS, SIGFPE, SIGSEGV};
use std::cell::{Cell, RefCell};
use std::ptr;

/// Size of the per-thread alternate signal stack. `SA_ONSTACK` only
/// protects against a `SIGSEGV` from stack exhaustion if a handler
/// actually has somewhere else to run; without an installed altstack the
/// flag is a no-op and a stack-overflow fault re-faults immediately.
const ALTSTACK_SIZE: usize = 64 * 1024;

thread_local! {
    static ALT_STACK: RefCell<Vec<u8>> = RefCell::new(vec![0u8; ALTSTACK_SIZE]);
}

extern "C" {
    #[link_name = "__sigsetjmp"]
    fn sigsetjmp(env: *mut SigJmpBuf, savesigs: c_int) -> c_int;
    fn siglongjmp(env: *mut SigJmpBuf, val: c_int) -> !;
}

/// Opaque `sigjmp_buf`. Glibc's is a few hundred bytes; we never inspect
/// the contents, only pass the pointer through to `sigsetjmp`/`siglongjmp`,
/// so an oversized buffer is safe on every supported ABI.
#[repr(C, align(16))]
struct SigJmpBuf([u8; 256]);

impl SigJmpBuf {
    const fn zeroed() -> Self {
        SigJmpBuf([0u8; 256])
    }
}

thread_local! {
    static IN_GUARD: Cell<bool> = Cell::new(false);
    static JMP_BUF: RefCell<SigJmpBuf> = RefCell::new(SigJmpBuf::zeroed());
    static CAUGHT_SIGNAL: Cell<c_int> = Cell::new(0);
}

extern "C" fn crash_signal_handler(sig: c_int) {
    if IN_GUARD.with(|g| g.get()) {
        CAUGHT_SIGNAL.with(|c| c.set(sig));
        JMP_BUF.with(|buf| unsafe {
            siglongjmp(buf.as_ptr(), sig);
        });
    }
}

/// Outcome of a crash-guarded call.
#[derive(Debug, Clone)]
pub struct CrashGuardResult {
    pub crashed: bool,
    pub crash_code: i32,
    pub description: String,
}

impl CrashGuardResult {
    fn ok() -> Self {
        CrashGuardResult {
            crashed: false,
            crash_code: 0,
            description: String::new(),
        }
    }

    fn crashed(sig: c_int) -> Self {
        let description = match sig {
            SIGSEGV => "Segmentation fault (SIGSEGV) - likely a bug in the ODBC driver",
            SIGBUS => "Bus error (SIGBUS) - likely a bug in the ODBC driver",
            SIGFPE => "Floating-point exception (SIGFPE) - likely a bug in the ODBC driver",
            _ => "Unknown signal - likely a bug in the ODBC driver",
        };
        CrashGuardResult {
            crashed: true,
            crash_code: sig,
            description: format!("{description} (signal {sig})"),
        }
    }
}

unsafe fn install(sig: c_int, old: &mut sigaction) -> bool {
    let mut sa: sigaction = std::mem::zeroed();
    sa.sa_sigaction = crash_signal_handler as sighandler_t;
    sa.sa_flags = SA_ONSTACK;
    libc::sigemptyset(&mut sa.sa_mask);
    sigaction(sig, &sa, old) == 0
}

unsafe fn restore(sig: c_int, old: &sigaction) {
    sigaction(sig, old, ptr::null_mut());
}

unsafe fn install_altstack(old: &mut stack_t) -> bool {
    ALT_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let ss = stack_t {
            ss_sp: stack.as_mut_ptr() as *mut libc::c_void,
            ss_flags: 0,
            ss_size: stack.len(),
        };
        libc::sigaltstack(&ss, old) == 0
    })
}

unsafe fn restore_altstack(old: &stack_t) {
    libc::sigaltstack(old, ptr::null_mut());
}

/// Run `f` with signal-based crash protection. `f` must not allocate or
/// lock anything it expects to still be consistent after a non-local jump;
/// on crash, `f`'s remaining call stack is abandoned without running
/// destructors, which is correct here because a hardware fault means the
/// driver already left memory in an unknown state.
pub fn execute_with_crash_guard<F: FnOnce()>(f: F) -> CrashGuardResult {
    let mut old_segv: sigaction = unsafe { std::mem::zeroed() };
    let mut old_bus: sigaction = unsafe { std::mem::zeroed() };
    let mut old_fpe: sigaction = unsafe { std::mem::zeroed() };
    let mut old_altstack: stack_t = unsafe { std::mem::zeroed() };

    let altstack_installed = unsafe { install_altstack(&mut old_altstack) };

    unsafe {
        install(SIGSEGV, &mut old_segv);
        install(SIGBUS, &mut old_bus);
        install(SIGFPE, &mut old_fpe);
    }

    IN_GUARD.with(|g| g.set(true));

    let jumped = JMP_BUF.with(|buf| unsafe { sigsetjmp(buf.as_ptr(), 1) });

    let result = if jumped == 0 {
        f();
        CrashGuardResult::ok()
    } else {
        CrashGuardResult::crashed(jumped)
    };

    IN_GUARD.with(|g| g.set(false));

    unsafe {
        restore(SIGSEGV, &old_segv);
        restore(SIGBUS, &old_bus);
        restore(SIGFPE, &old_fpe);
        if altstack_installed {
            restore_altstack(&old_altstack);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_call_does_not_crash() {
        let mut ran = false;
        let result = execute_with_crash_guard(|| {
            ran = true;
        });
        assert!(!result.crashed);
        assert!(ran);
    }

    #[test]
    fn guard_is_reentrant_after_a_clean_call() {
        for _ in 0..3 {
            let result = execute_with_crash_guard(|| {});
            assert!(!result.crashed);
        }
    }
}
