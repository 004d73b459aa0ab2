use clap::{Args, Subcommand};
use park_core::enums::VehicleCategory;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Park an incoming vehicle and issue a ticket.
    Enter(EnterArgs),
    /// Release a vehicle, price its ticket and free the spot.
    Exit(ExitArgs),
    /// List parking spots and their availability.
    Spots(SpotsArgs),
    /// Show the ticket history of a vehicle.
    History(HistoryArgs),
    /// Clear all tickets and mark every spot available.
    Reset(ResetArgs),
    /// Interactive attendant menu.
    Shell,
}

#[derive(Clone, Debug, Args)]
pub struct EnterArgs {
    /// Vehicle registration number.
    #[arg(long)]
    pub plate: String,
    /// Vehicle category: car or bike.
    #[arg(long)]
    pub category: VehicleCategory,
}

#[derive(Clone, Debug, Args)]
pub struct ExitArgs {
    /// Vehicle registration number.
    #[arg(long)]
    pub plate: String,
}

#[derive(Clone, Debug, Args)]
pub struct SpotsArgs {
    /// Only list spots of this category.
    #[arg(long)]
    pub category: Option<VehicleCategory>,
    /// Only list free spots.
    #[arg(long)]
    pub available: bool,
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Vehicle registration number.
    #[arg(long)]
    pub plate: String,
    /// Max tickets to return, newest first.
    #[arg(short, long, default_value_t = 20)]
    pub limit: u32,
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation check.
    #[arg(long)]
    pub yes: bool,
}
