#[cfg(feature = "log")]
#[allow(unused)]
#[macro_use]
mod shim {
    macro_rules! trace {
        ($($args:tt)*) => { ::log::trace!($($args)*) }
    }

    macro_rules! debug {
        ($($args:tt)*) => { ::log::debug!($($args)*) }
    }
}

#[cfg(not(feature = "log"))]
#[allow(unused)]
#[macro_use]
mod shim {
    macro_rules! trace {
        ($($args:tt)*) => {}
    }

    macro_rules! debug {
        ($($args:tt)*) => {}
    }
}
