use clap::{Args, Parser, Subcommand};
use cost_estimator::pricing::{AcceleratorTier, ServiceId, SupportTier};
use cost_estimator::ConfigUpdate;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cost-estimator", version, about = "Enterprise AI cloud cost estimator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    /// Pricing file (TOML or JSON), overrides the configured one
    #[arg(long, global = true)]
    pub pricing: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate the monthly cost of a configuration (default)
    Estimate(EstimateArgs),

    /// Pricing table commands
    Pricing {
        #[command(subcommand)]
        action: PricingCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    /// Start from the smallest allowed configuration instead of the defaults
    #[arg(long)]
    pub minimal: bool,

    /// Number of CPU cores
    #[arg(long)]
    pub cores: Option<u32>,

    /// Accelerator tier: none, tier-a, tier-b
    #[arg(long)]
    pub accelerator: Option<AcceleratorTier>,

    /// Memory in GB
    #[arg(long)]
    pub memory: Option<u32>,

    /// Fast (SSD) storage in GB
    #[arg(long)]
    pub fast_storage: Option<u32>,

    /// Archive (HDD) storage in GB
    #[arg(long)]
    pub archive_storage: Option<u32>,

    /// Enable an add-on service (repeatable): ml-ops, data-processing, monitoring, security
    #[arg(long = "service")]
    pub services: Vec<ServiceId>,

    /// Support tier: basic, business, enterprise
    #[arg(long)]
    pub support: Option<SupportTier>,

    /// JSON file with a list of edits to apply after the flags
    #[arg(long)]
    pub edits: Option<PathBuf>,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,
}

impl EstimateArgs {
    /// Edits implied by the command-line flags, in field order
    pub fn updates(&self) -> Vec<ConfigUpdate> {
        let mut updates = Vec::new();

        if let Some(cores) = self.cores {
            updates.push(ConfigUpdate::ComputeCores(cores));
        }
        if let Some(tier) = self.accelerator {
            updates.push(ConfigUpdate::Accelerator(tier));
        }
        if let Some(memory) = self.memory {
            updates.push(ConfigUpdate::MemoryGb(memory));
        }
        if let Some(gb) = self.fast_storage {
            updates.push(ConfigUpdate::FastStorageGb(gb));
        }
        if let Some(gb) = self.archive_storage {
            updates.push(ConfigUpdate::ArchiveStorageGb(gb));
        }
        updates.extend(self.services.iter().copied().map(ConfigUpdate::enable));
        if let Some(tier) = self.support {
            updates.push(ConfigUpdate::Support(tier));
        }

        updates
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PricingCommands {
    /// Print the active pricing table as TOML
    Show,

    /// Load and validate the pricing table
    Validate,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
}

impl Cli {
    /// Get the command to execute, defaulting to Estimate if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Estimate(EstimateArgs::default()))
    }
}
