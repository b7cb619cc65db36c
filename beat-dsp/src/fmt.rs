// Logging shims. With the `logging` feature these forward to defmt, without it
// the arguments are only borrowed so call sites stay warning free.

#[macro_export]
#[doc(hidden)]
macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "logging")]
            $crate::__defmt::trace!($s $(, $x)*);
            #[cfg(not(feature = "logging"))]
            let _ = ($( & $x ),*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "logging")]
            $crate::__defmt::info!($s $(, $x)*);
            #[cfg(not(feature = "logging"))]
            let _ = ($( & $x ),*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(feature = "logging")]
            $crate::__defmt::warn!($s $(, $x)*);
            #[cfg(not(feature = "logging"))]
            let _ = ($( & $x ),*);
        }
    };
}
