use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the plugin-pack tool
#[derive(Debug)]
pub struct Args {
    /// Print every archived entry
    pub verbose: bool,

    /// Plugin folder to package (defaults to the current directory)
    pub path: Option<PathBuf>,

    /// Directory receiving the archive (defaults to the plugin folder's parent)
    pub output: Option<PathBuf>,

    /// File holding the version constant, relative to the plugin folder
    pub main_file: Option<PathBuf>,

    /// Name of the version constant
    pub constant: Option<String>,

    /// Extra path-segment names to leave out of the archive
    pub exclude: Vec<String>,

    /// Archive format (`zip` or `tar.gz`)
    pub format: String,

    /// Archive base name template
    pub filename: String,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(command().get_matches())
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            main_file: matches.get_one::<String>("main-file").map(PathBuf::from),
            constant: matches.get_one::<String>("constant").cloned(),
            exclude: matches
                .get_many::<String>("exclude")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            format: matches
                .get_one::<String>("format")
                .cloned()
                .unwrap_or_else(|| "zip".to_string()),
            filename: matches
                .get_one::<String>("filename")
                .cloned()
                .unwrap_or_else(|| "$NAME $VERSION".to_string()),
        }
    }
}

fn command() -> Command {
    Command::new("plugin-pack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Package a plugin folder into a versioned archive")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .env("PLUGIN_PACK_PATH")
                .help("Plugin folder to package (defaults to the current directory)")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .env("PLUGIN_PACK_OUTPUT")
                .help("Directory receiving the archive (defaults to the plugin folder's parent)")
        )
        .arg(
            Arg::new("main-file")
                .short('m')
                .long("main-file")
                .value_name("FILE")
                .env("PLUGIN_PACK_MAIN_FILE")
                .help("File holding the version constant, e.g. my-plugin.php")
        )
        .arg(
            Arg::new("constant")
                .short('c')
                .long("constant")
                .value_name("NAME")
                .env("PLUGIN_PACK_CONSTANT")
                .help("Version constant name, e.g. MY_PLUGIN_VERSION")
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Additional file or directory name to exclude (repeatable)")
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .value_parser(["zip", "tar.gz"])
                .default_value("zip")
                .help("Archive format")
        )
        .arg(
            Arg::new("filename")
                .short('n')
                .long("filename")
                .value_name("TEMPLATE")
                .default_value("$NAME $VERSION")
                .help("Archive base name; $NAME is the folder name, $VERSION the plugin version")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print every archived entry")
        )
}
