//! Magic-line argument parsing.

use clap::Parser;

use crate::KernelError;

/// Title used when a watched cell finishes without error.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Cell execution completed successfully";

/// Title used when a watched cell raises.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Cell execution failed";

/// Seconds a cell must run before `%notify_all` reports it.
pub const DEFAULT_THRESHOLD_SECS: u64 = 120;

/// Arguments of the `%%notify` cell magic.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "notify", about = "Notify when this cell finishes")]
pub struct NotifyArgs {
    /// Title for the notification upon successful cell completion
    #[arg(short, long, default_value = DEFAULT_SUCCESS_MESSAGE)]
    pub success: String,

    /// Title for the notification upon unsuccessful cell completion
    #[arg(short, long, default_value = DEFAULT_FAILURE_MESSAGE)]
    pub failure: String,

    /// Send a mail including the cell result instead of a desktop notification
    #[arg(short, long)]
    pub mail: bool,
}

/// Arguments of the `%notify_all` line magic.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "notify_all",
    about = "Notify for every cell that runs longer than a threshold or fails"
)]
pub struct NotifyAllArgs {
    /// Notify for cells taking at least this many seconds (default 120)
    #[arg(short, long, value_name = "SECONDS")]
    pub threshold: Option<u64>,

    /// Title for the notification upon successful cell completion
    #[arg(short, long, default_value = DEFAULT_SUCCESS_MESSAGE)]
    pub success: String,

    /// Title for the notification upon unsuccessful cell completion
    #[arg(short, long, default_value = DEFAULT_FAILURE_MESSAGE)]
    pub failure: String,

    /// Send a mail including the cell result instead of a desktop notification
    #[arg(short, long)]
    pub mail: bool,

    /// Disable notebook notifications and clear any threshold
    #[arg(short, long, conflicts_with = "mail")]
    pub disable: bool,
}

impl NotifyAllArgs {
    /// Threshold in seconds; missing or zero means the default.
    pub fn threshold_secs(&self) -> u64 {
        self.threshold
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_THRESHOLD_SECS)
    }
}

/// Splits `line` like a shell would and parses it as the arguments of `magic`.
///
/// # Errors
///
/// Returns [`KernelError::InvalidArguments`] for unbalanced quotes, unknown flags, bad values,
/// conflicting flags, and `--help` (whose text becomes the error message).
pub fn parse_magic_line<T: Parser>(magic: &'static str, line: &str) -> Result<T, KernelError> {
    let tokens = shell_words::split(line).map_err(|err| KernelError::InvalidArguments {
        magic,
        message: err.to_string(),
    })?;
    T::try_parse_from(std::iter::once(magic.to_string()).chain(tokens)).map_err(|err| {
        KernelError::InvalidArguments {
            magic,
            message: err.to_string(),
        }
    })
}

/// Parses a `%notify_all` line.
///
/// `--disable` may only be combined with a zero threshold, which means "no threshold".
///
/// # Errors
///
/// Returns [`KernelError::InvalidArguments`] for everything [`parse_magic_line`] rejects and for
/// `--disable` with a non-zero `--threshold`.
pub fn parse_notify_all_line(line: &str) -> Result<NotifyAllArgs, KernelError> {
    let args: NotifyAllArgs = parse_magic_line("notify_all", line)?;
    if args.disable && args.threshold.is_some_and(|secs| secs > 0) {
        return Err(KernelError::InvalidArguments {
            magic: "notify_all",
            message: "the argument '--disable' cannot be used with a non-zero '--threshold'"
                .to_string(),
        });
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_lines_use_default_titles() {
        let args: NotifyArgs = parse_magic_line("notify", "").expect("parse");
        assert_eq!(
            args,
            NotifyArgs {
                success: DEFAULT_SUCCESS_MESSAGE.to_string(),
                failure: DEFAULT_FAILURE_MESSAGE.to_string(),
                mail: false,
            }
        );
    }

    #[test]
    fn quoted_titles_stay_single_arguments() {
        let args: NotifyArgs =
            parse_magic_line("notify", r#"-s "Training done" --failure 'Training crashed' -m"#)
                .expect("parse");
        assert_eq!(args.success, "Training done");
        assert_eq!(args.failure, "Training crashed");
        assert!(args.mail);
    }

    #[test]
    fn threshold_defaults_when_missing_or_zero() {
        let args: NotifyAllArgs = parse_magic_line("notify_all", "").expect("parse");
        assert_eq!(args.threshold_secs(), DEFAULT_THRESHOLD_SECS);

        let args: NotifyAllArgs = parse_magic_line("notify_all", "-t 0").expect("parse");
        assert_eq!(args.threshold_secs(), DEFAULT_THRESHOLD_SECS);

        let args: NotifyAllArgs = parse_magic_line("notify_all", "--threshold 30").expect("parse");
        assert_eq!(args.threshold_secs(), 30);
    }

    #[test]
    fn disable_conflicts_with_threshold_and_mail() {
        for line in ["--disable --threshold 10", "-d -m", "-d -t 1 -m"] {
            let err = parse_notify_all_line(line).expect_err("conflicting flags");
            assert!(
                matches!(err, KernelError::InvalidArguments { magic: "notify_all", .. }),
                "{line}: {err}"
            );
        }
        assert!(parse_notify_all_line("-d").expect("parse").disable);
    }

    #[test]
    fn disable_accepts_a_zero_threshold() {
        let args = parse_notify_all_line("--disable -t 0").expect("parse");
        assert!(args.disable);
        assert_eq!(args.threshold, Some(0));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(parse_magic_line::<NotifyArgs>("notify", "-s \"unterminated").is_err());
        assert!(parse_magic_line::<NotifyAllArgs>("notify_all", "-t soon").is_err());
        assert!(parse_magic_line::<NotifyArgs>("notify", "--threshold 3").is_err());
    }
}
