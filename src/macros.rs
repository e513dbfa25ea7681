#![allow(unused_macros, dead_code)]
// Log lines go to stderr so generated source can be piped from stdout.
macro_rules! verbose_println {
    ($($p:expr),+) => {
        if (crate::config::ARGS.verbose) {
            eprintln!($($p),+);
        }
    }
}
macro_rules! info {
    ($($p:expr),+) => {
        eprintln!(concat!(blue!("INFO"),": {}"),format_args!($($p),+))
    }
}

macro_rules! warn {
    ($($p:expr),+) => {
        eprintln!(concat!(yellow!("WARNING"),": {}"),format_args!($($p),+))
    }
}
macro_rules! general_err {
    ($msg:expr) => {
        crate::error::Error::new(crate::error::ErrorKind::General, None, format!("{}", $msg).as_str())
    };
}
/// Builds an error of the given kind tagged with where in a source document it happened.
macro_rules! source_err {
    ($kind:expr, $ctx:expr, $($msg:expr),+) => {
        crate::error::Error::new(
            $kind,
            Some($ctx.to_string()),
            format!("{} {}", red!("Scrape Error"), format!($($msg),+)).as_str(),
        )
    };
}
macro_rules! color {
    ($color: literal, $msg: expr) => {
        concat!("\x1b[", $color, "m", $msg, "\x1b[0m")
    };
}
macro_rules! red {
    ($msg:expr) => {
        color!(91, $msg)
    };
}
macro_rules! green {
    ($msg:expr) => {
        color!(92, $msg)
    };
}
macro_rules! yellow {
    ($msg:expr) => {
        color!(93, $msg)
    };
}
macro_rules! blue {
    ($msg:expr) => {
        color!(94, $msg)
    };
}
