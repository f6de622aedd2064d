//! roam-bridge: evaluate one org-roam procedure call in a running Emacs.
//!
//! Reads `{"procedure": "...", "args": [...]}` from stdin and prints
//! `{"ok": true, "result": ...}` or `{"ok": false, "kind": ..., "error": ...}`.
//!
//! Flags:
//!   --server-file PATH   Emacs server file (overrides config and EMACS_SERVER_FILE)
//!   --timeout SECS       per-call timeout
//!   --text               reply is a printed string, not JSON
//!   --check              report required features that are not loaded
//!   --dump-config        print the merged configuration and exit
//!   --verbose            debug logging on stderr

use std::io::Read;
use std::process::exit;

use log::error;
use serde_json::json;

use roam_bridge::Bridge;
use roam_bridge::config::Config;
use roam_bridge::logging;
use roam_bridge::request::{CONFIG_KIND, REQUEST_KIND, Request, Response};

#[derive(Debug, Default)]
struct Flags {
    server_file: Option<String>,
    timeout_secs: Option<u64>,
    text: bool,
    check: bool,
    dump_config: bool,
    verbose: bool,
}

fn parse_flags(args: impl Iterator<Item = String>) -> Result<Flags, String> {
    let mut flags = Flags::default();
    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--server-file" => {
                flags.server_file = Some(args.next().ok_or("--server-file needs a path")?);
            }
            "--timeout" => {
                let v = args.next().ok_or("--timeout needs a number of seconds")?;
                let secs = v
                    .parse()
                    .map_err(|_| format!("--timeout: `{v}` is not a number of seconds"))?;
                flags.timeout_secs = Some(secs);
            }
            "--text" => flags.text = true,
            "--check" => flags.check = true,
            "--dump-config" => flags.dump_config = true,
            "--verbose" | "-v" => flags.verbose = true,
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(flags)
}

fn respond(response: Response) -> ! {
    let ok = response.is_ok();
    match serde_json::to_string(&response) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("roam-bridge: cannot serialize response: {e}"),
    }
    exit(if ok { 0 } else { 1 })
}

fn main() {
    let flags = match parse_flags(std::env::args().skip(1)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("roam-bridge: {e}");
            exit(2);
        }
    };
    logging::init(flags.verbose);

    let mut config = Config::load();
    config.apply_flags(flags.server_file.clone(), flags.timeout_secs);

    if flags.dump_config {
        match config.to_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("roam-bridge: cannot render config: {e}");
                exit(1);
            }
        }
        return;
    }

    let bridge = Bridge::new(config.bridge_config());

    if flags.check {
        let features = match config.required_symbols() {
            Ok(f) => f,
            Err(e) => respond(Response::error(CONFIG_KIND, e)),
        };
        match bridge.missing_features(&features) {
            Ok(missing) => respond(Response::ok(json!({ "missing": missing }))),
            Err(e) => respond(e.into()),
        }
    }

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        respond(Response::error(REQUEST_KIND, format!("failed to read stdin: {e}")));
    }

    let request: Request = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => respond(Response::error(REQUEST_KIND, format!("JSON parse error: {e}"))),
    };
    let call = match request.to_call() {
        Ok(c) => c,
        Err(e) => respond(e.into()),
    };

    let result = if flags.text {
        bridge.evaluate_text(&call).map(|s| json!(s))
    } else {
        bridge.evaluate(&call)
    };
    match result {
        Ok(value) => respond(Response::ok(value)),
        Err(e) => {
            error!("{} failed: {e}", call.procedure());
            respond(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(args: &[&str]) -> Result<Flags, String> {
        parse_flags(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn all_flags() {
        let f = flags(&[
            "--server-file",
            "/tmp/server",
            "--timeout",
            "9",
            "--text",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(f.server_file.as_deref(), Some("/tmp/server"));
        assert_eq!(f.timeout_secs, Some(9));
        assert!(f.text && f.verbose);
        assert!(!f.check && !f.dump_config);
    }

    #[test]
    fn missing_values_and_unknown_flags() {
        assert!(flags(&["--server-file"]).is_err());
        assert!(flags(&["--timeout", "soon"]).is_err());
        assert!(flags(&["--frobnicate"]).is_err());
    }

    #[test]
    fn no_flags() {
        let f = flags(&[]).unwrap();
        assert!(f.server_file.is_none() && f.timeout_secs.is_none());
    }
}
