//! Deterministic entropy functions.

use super::errno::set_errno;
use crate::Error;
use crate::runtime::entropy::{self, MAX_ENTROPY_LEN};
use macros::tessera_symbol;
use tracing::debug;

/// Fill a buffer with up to 256 pseudo-random bytes.
///
/// Returns 0 on success. A null buffer or an oversized request sets `errno`
/// to `EINVAL`, returns -1 and writes nothing.
#[tessera_symbol]
pub unsafe fn getentropy(buffer: *mut libc::c_void, length: libc::size_t) -> libc::c_int {
    if buffer.is_null() || length > MAX_ENTROPY_LEN {
        debug!("getentropy rejected: buffer={:p} length={}", buffer, length);
        set_errno(Error::InvalidArgument.errno());
        return -1;
    }
    // SAFETY: caller passes a buffer writable for `length` bytes.
    let buf = unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), length) };
    match entropy::global().fill(buf) {
        Ok(()) => 0,
        Err(err) => {
            set_errno(err.errno());
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::errno::errno;
    use super::*;
    use std::ptr;

    #[test]
    fn fills_requested_length_only() {
        let mut buf = [0u8; 40];
        let rc = unsafe { tessera_getentropy(buf.as_mut_ptr().cast(), 33) };
        assert_eq!(rc, 0);
        assert!(buf[..33].iter().any(|&b| b != 0));
        assert!(buf[33..].iter().all(|&b| b == 0));
    }

    #[test]
    fn maximum_length_is_accepted() {
        let mut buf = [0u8; MAX_ENTROPY_LEN];
        assert_eq!(unsafe { tessera_getentropy(buf.as_mut_ptr().cast(), buf.len()) }, 0);
    }

    #[test]
    fn zero_length_succeeds() {
        let mut byte = 0x5Au8;
        assert_eq!(unsafe { tessera_getentropy((&mut byte as *mut u8).cast(), 0) }, 0);
        assert_eq!(byte, 0x5A);
    }

    #[test]
    fn oversized_request_is_rejected() {
        let mut buf = [0x11u8; MAX_ENTROPY_LEN + 1];
        let rc = unsafe { tessera_getentropy(buf.as_mut_ptr().cast(), buf.len()) };
        assert_eq!(rc, -1);
        assert_eq!(errno(), libc::EINVAL);
        assert!(buf.iter().all(|&b| b == 0x11));
    }

    #[test]
    fn null_buffer_is_rejected() {
        assert_eq!(unsafe { tessera_getentropy(ptr::null_mut(), 8) }, -1);
        assert_eq!(errno(), libc::EINVAL);
        assert_eq!(unsafe { tessera_getentropy(ptr::null_mut(), 0) }, -1);
    }
}
