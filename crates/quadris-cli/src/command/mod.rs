use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_mode_defaults_to_none() {
        let args = CommandArgs::try_parse_from(["quadris"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_options() {
        let args = CommandArgs::try_parse_from([
            "quadris",
            "play",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--frame-rate",
            "30",
            "--save-result",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert!((arg.frame_rate - 30.0).abs() < f64::EPSILON);
        assert!(arg.save_result);
    }

    #[test]
    fn test_rejects_malformed_seed() {
        assert!(CommandArgs::try_parse_from(["quadris", "play", "--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_rejects_frame_rate_out_of_range() {
        for rate in ["1e-300", "0", "5000"] {
            assert!(
                CommandArgs::try_parse_from(["quadris", "play", "--frame-rate", rate]).is_err(),
                "{rate}"
            );
        }
    }
}
