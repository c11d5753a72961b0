use std::{env, process::exit};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tessera::libc::entropy::tessera_getentropy;
use tessera::libc::time::{tessera_clock_gettime, timespec};
use tessera::symbols;

struct Opts {
    /// Number of clock observations to print.
    count: usize,

    /// Number of entropy bytes to print.
    entropy: usize,

    /// Whether to list the registered overrides.
    list_symbols: bool,
}

fn main() {
    setup_logging();

    let args: Vec<String> = env::args().collect();
    let opts = match parse_opts(&args) {
        Some(opts) => opts,
        None => {
            eprintln!("usage: tessera [--count N] [--entropy LEN] [--list-symbols]");
            exit(1);
        }
    };

    if opts.list_symbols {
        for name in symbols::names() {
            println!("{name}");
        }
    }

    for _ in 0..opts.count {
        let mut ts = timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        // SAFETY: `ts` is a valid, writable timespec.
        if unsafe { tessera_clock_gettime(libc::CLOCK_MONOTONIC, &mut ts) } != 0 {
            eprintln!("clock_gettime failed");
            exit(1);
        }
        println!("{}.{:09}", ts.tv_sec, ts.tv_nsec);
    }

    if opts.entropy > 0 {
        let mut buf = vec![0u8; opts.entropy];
        // SAFETY: `buf` is writable for its full length.
        if unsafe { tessera_getentropy(buf.as_mut_ptr().cast(), buf.len()) } != 0 {
            eprintln!("getentropy failed: {}", std::io::Error::last_os_error());
            exit(1);
        }
        let hex: String = buf.iter().map(|b| format!("{b:02x}")).collect();
        println!("{hex}");
    }

    info!("done");
}

fn parse_opts(args: &[String]) -> Option<Opts> {
    let mut opts = Opts {
        count: 1,
        entropy: 0,
        list_symbols: false,
    };
    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--count" => {
                opts.count = args.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            "--entropy" => {
                opts.entropy = args.get(i + 1)?.parse().ok()?;
                i += 2;
            }
            "--list-symbols" => {
                opts.list_symbols = true;
                i += 1;
            }
            _ => return None,
        }
    }
    Some(opts)
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
