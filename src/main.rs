use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tplpkg::commands::{self, ConfigOptions};

/// tplpkg - .NET template package browser
///
/// Lists template packages from the NuGet catalog alongside the packages
/// shipped with the SDK and those installed by the user, and shows the
/// templates each package contains.
///
/// Examples:
///   tplpkg list                      # Catalog packages with install status
///   tplpkg templates                 # Templates in local packages
///   tplpkg inspect Foo.1.0.0.nupkg   # Templates in one archive
#[derive(Parser, Debug)]
#[command(author, version = env!("TPLPKG_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog search endpoint (defaults to the NuGet search API)
    #[arg(
        long = "catalog-url",
        env = "TPLPKG_CATALOG_URL",
        value_name = "URL",
        global = true
    )]
    pub catalog_url: Option<String>,

    /// .NET installation root (defaults to DOTNET_ROOT, then the platform location)
    #[arg(long = "dotnet-root", value_name = "PATH", global = true)]
    pub dotnet_root: Option<PathBuf>,

    /// Directory of user-installed packages (defaults to ~/.templateengine/packages)
    #[arg(
        long = "packages-dir",
        env = "TPLPKG_PACKAGES_DIR",
        value_name = "PATH",
        global = true
    )]
    pub packages_dir: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> ConfigOptions {
        ConfigOptions {
            catalog_url: self.catalog_url.clone(),
            dotnet_root: self.dotnet_root.clone(),
            packages_dir: self.packages_dir.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List catalog packages and whether they are installed
    List,

    /// List templates in built-in and installed packages
    Templates,

    /// List templates in a package archive
    Inspect(InspectArgs),

    /// Install a template package
    Install(PackageArgs),

    /// Uninstall a template package
    Uninstall(PackageArgs),
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Path to a .nupkg, .zip, .tar.gz or .tgz archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct PackageArgs {
    /// Package id as listed by `tplpkg list`
    #[arg(value_name = "ID")]
    pub id: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = tplpkg::runtime::RealRuntime;
    let options = cli.options();

    match cli.command {
        Commands::List => commands::list(runtime, options).await?,
        Commands::Templates => commands::templates(runtime, options)?,
        Commands::Inspect(args) => commands::inspect(runtime, &args.archive)?,
        Commands::Install(args) => commands::install(&args.id).await?,
        Commands::Uninstall(args) => commands::uninstall(&args.id).await?,
    }
    Ok(())
}
