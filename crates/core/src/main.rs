//! Native crypto core: KDFs, secp256k1 key arithmetic, and the
//! block-scan exchange, behind a single method-name dispatch surface.

pub mod dispatch;
pub mod scan;

pub use dispatch::{dispatch, CoreError, ErrorKind};
pub use scan::download_and_process;

use fastcrypto_log::{Format, Level, LogConfig};

pub fn run_cli() -> Result<(), String> {
    let mut args = std::env::args().skip(1);

    let mut method: Option<String> = None;
    let mut params_text: Option<String> = None;
    let mut log_level = Level::Info;
    let mut log_format = Format::Text;
    let mut log_timestamps = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "help" | "--help" | "-h" => {
                println!("{}", usage());
                return Ok(());
            }
            "version" | "--version" | "-V" => {
                println!("fastcrypto {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--log-level" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-level\n{}", usage()))?;
                log_level = Level::parse(&value)
                    .ok_or_else(|| format!("invalid log level '{value}'\n{}", usage()))?;
            }
            "--log-format" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for --log-format\n{}", usage()))?;
                log_format = Format::parse(&value)
                    .ok_or_else(|| format!("invalid log format '{value}'\n{}", usage()))?;
            }
            "--no-log-timestamps" => {
                log_timestamps = false;
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{other}'\n{}", usage()));
            }
            other => {
                if method.is_none() {
                    method = Some(other.to_string());
                } else if params_text.is_none() {
                    params_text = Some(other.to_string());
                } else {
                    return Err(format!("unexpected argument '{other}'\n{}", usage()));
                }
            }
        }
    }

    let Some(method) = method else {
        return Err(usage());
    };

    fastcrypto_log::init(LogConfig {
        level: log_level,
        format: log_format,
        timestamps: log_timestamps,
    });

    let params_text = params_text.unwrap_or_else(|| "{}".to_string());
    let params: serde_json::Value = serde_json::from_str(&params_text)
        .map_err(|err| format!("invalid params JSON: {err}\n{}", usage()))?;
    if !params.is_object() {
        return Err(format!("params must be a JSON object\n{}", usage()));
    }

    match dispatch(&method, &params) {
        Ok(result) => {
            println!("{result}");
            Ok(())
        }
        Err(err) => Err(err.to_json().to_string()),
    }
}

fn usage() -> String {
    [
        "Usage:",
        "  fastcrypto-cli <method> [json-params] [options]",
        "",
        "Methods:",
        "  scrypt                      password, salt, n, r, p, size",
        "  pbkdf2Sha512                password, salt (hex or base64), iterations, size",
        "  secp256k1EcPubkeyCreate     private_key_hex, compressed",
        "  secp256k1EcPrivkeyTweakAdd  private_key_hex, tweak_hex",
        "  secp256k1EcPubkeyTweakAdd   public_key_hex, tweak_hex, compressed",
        "  download_and_process        url, start_height, optional output_keys",
        "",
        "Options:",
        "  --help, -h  Print this help and exit",
        "  --version, -V  Print version and exit",
        "  --log-level  Log verbosity (error|warn|info|debug|trace) (default: info)",
        "  --log-format  Log output format (text|json) (default: text)",
        "  --no-log-timestamps  Disable timestamps in text logs",
        "",
        "The result JSON is printed on stdout; a structured error JSON goes to",
        "stderr with a nonzero exit code.",
    ]
    .join("\n")
}
