//! Logging shims.
//!
//! Forward to `log` or `defmt` depending on which feature is enabled, and
//! compile to nothing when neither is. Only use `{}` placeholders with
//! integers or [`Error`](crate::error::Error) so both backends accept them.
#![allow(unused_macros)]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "log")]
            ::log::trace!($s $(, $x)*);
            #[cfg(feature = "defmt-0-3")]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
            let _ = ($( & $x, )*);
        }
    };
}

/// Hex dump of a whole wire frame at trace level, e.g. `Tx: 7e 00 07 01 ...`.
macro_rules! trace_frame {
    ($dir:literal, $bytes:expr) => {
        {
            #[cfg(feature = "log")]
            ::log::trace!("{}: {}", $dir, $crate::fmt::Hex($bytes));
            #[cfg(feature = "defmt-0-3")]
            ::defmt::trace!("{=str}: {=[u8]:x}", $dir, $bytes);
            #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
            let _ = (&$dir, &$bytes);
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "log")]
            ::log::debug!($s $(, $x)*);
            #[cfg(feature = "defmt-0-3")]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
            let _ = ($( & $x, )*);
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "log")]
            ::log::warn!($s $(, $x)*);
            #[cfg(feature = "defmt-0-3")]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(not(any(feature = "log", feature = "defmt-0-3")))]
            let _ = ($( & $x, )*);
        }
    };
}

/// Space-separated lowercase hex, the way frames are printed on the console.
#[cfg(feature = "log")]
pub(crate) struct Hex<'a>(pub(crate) &'a [u8]);

#[cfg(feature = "log")]
impl core::fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
