//! Distance command.

use clap::Args;
use medmap::geo::{format_distance, haversine_km, round_to_tenth, Coordinates};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Start point as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub from: Coordinates,

    /// End point as LAT,LON
    #[arg(long, allow_hyphen_values = true)]
    pub to: Coordinates,
}

pub fn run(args: DistanceArgs) -> Result<(), CliError> {
    let km = haversine_km(args.from, args.to).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "non-finite coordinates: {} -> {}",
            args.from, args.to
        ))
    })?;

    println!("{} ({} km)", format_distance(km), round_to_tenth(km));
    Ok(())
}
