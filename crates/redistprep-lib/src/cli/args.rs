use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Fetch {
        config_path: Option<String>,
        urls: Vec<String>,
        name: String,
        digest: Option<String>,
        output_dir: Option<String>,
        max_retries: Option<u32>,
        non_interactive: bool,
    },
    InstallRuntime {
        config_path: Option<String>,
        target_arch: Option<String>,
        output_dir: Option<String>,
        max_retries: Option<u32>,
        signature_tool: Option<String>,
        metadata_tool: Option<String>,
        non_interactive: bool,
    },
    Plan {
        target_arch: String,
        portable: bool,
        side_by_side: bool,
        app_name: String,
        app_version: String,
        install_root: String,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "redistprep",
    version,
    author = "Nick Guletskii",
    about = "Fetch, validate and chain-install runtime redistributables for application setup flows"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Download one artifact with mirror fallback and bounded retries
    Fetch {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file for output-dir and retry fallbacks"
        )]
        config: Option<String>,

        #[arg(
            short = 'u',
            long = "url",
            value_name = "URL",
            help = "Mirror URL for the artifact (repeat or use comma-separated values)",
            action = ArgAction::Append,
            value_delimiter = ',',
            required = true
        )]
        url: Vec<String>,

        #[arg(
            short = 'n',
            long = "name",
            value_name = "NAME",
            help = "Local file name to store the artifact under"
        )]
        name: String,

        #[arg(
            short = 'd',
            long = "digest",
            value_name = "ALGO:HEX",
            help = "Expected content digest, e.g. sha256:9f86d0..."
        )]
        digest: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the directory the artifact is stored in"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "max-retries",
            value_name = "N",
            help = "Extra full passes over the mirror list the user may approve (0 = one pass)"
        )]
        max_retries: Option<u32>,

        #[arg(
            long = "non-interactive",
            help = "Answer retry prompts with cancel instead of reading stdin",
            action = ArgAction::SetTrue
        )]
        non_interactive: bool,
    },

    /// Download, validate and install the runtime redistributable
    InstallRuntime {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Optional config file for architecture, policy and tool fallbacks"
        )]
        config: Option<String>,

        #[arg(
            short = 'a',
            long = "target-arch",
            value_name = "ARCH",
            help = "Target architecture (x86, x64 or arm64)"
        )]
        target_arch: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the directory the installer is downloaded to"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "max-retries",
            value_name = "N",
            help = "Extra download passes the user may approve (0 = one pass)"
        )]
        max_retries: Option<u32>,

        #[arg(
            long = "signature-tool",
            value_name = "PATH",
            help = "External signature verification command"
        )]
        signature_tool: Option<String>,

        #[arg(
            long = "metadata-tool",
            value_name = "PATH",
            help = "External version metadata command"
        )]
        metadata_tool: Option<String>,

        #[arg(
            long = "non-interactive",
            help = "Answer retry prompts with cancel instead of reading stdin",
            action = ArgAction::SetTrue
        )]
        non_interactive: bool,
    },

    /// Resolve and print the install plan for a mode/architecture selection
    Plan {
        #[arg(
            short = 'a',
            long = "target-arch",
            value_name = "ARCH",
            help = "Target architecture (x86, x64 or arm64)"
        )]
        target_arch: String,

        #[arg(
            long = "portable",
            help = "Portable mode: self-contained, relocatable install directory",
            action = ArgAction::SetTrue
        )]
        portable: bool,

        #[arg(
            long = "side-by-side",
            help = "Side-by-side mode: version-specific identity so versions coexist",
            action = ArgAction::SetTrue
        )]
        side_by_side: bool,

        #[arg(
            long = "app-name",
            value_name = "NAME",
            help = "Base application name"
        )]
        app_name: String,

        #[arg(
            long = "app-version",
            value_name = "VERSION",
            help = "Application version used by side-by-side identities"
        )]
        app_version: String,

        #[arg(
            long = "install-root",
            value_name = "DIR",
            help = "Root directory install paths are resolved under",
            default_value = "."
        )]
        install_root: String,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Fetch {
            config,
            url,
            name,
            digest,
            output_dir,
            max_retries,
            non_interactive,
        } => Command::Fetch {
            config_path: config,
            urls: url,
            name,
            digest,
            output_dir,
            max_retries,
            non_interactive,
        },
        CliCommand::InstallRuntime {
            config,
            target_arch,
            output_dir,
            max_retries,
            signature_tool,
            metadata_tool,
            non_interactive,
        } => Command::InstallRuntime {
            config_path: config,
            target_arch,
            output_dir,
            max_retries,
            signature_tool,
            metadata_tool,
            non_interactive,
        },
        CliCommand::Plan {
            target_arch,
            portable,
            side_by_side,
            app_name,
            app_version,
            install_root,
        } => Command::Plan {
            target_arch,
            portable,
            side_by_side,
            app_name,
            app_version,
            install_root,
        },
    };

    Args { command, log_level }
}
