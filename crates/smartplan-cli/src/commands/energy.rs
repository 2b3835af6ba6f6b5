//! Energy curve queries.

use clap::Subcommand;
use smartplan_core::storage::Config;
use smartplan_core::EnergyModel;

#[derive(Subcommand)]
pub enum EnergyAction {
    /// Show the daily energy curve
    Show,
    /// Show the peak energy hour
    Peak,
    /// Show hours suitable for deep work (capacity >= 70)
    DeepWork,
    /// Show hours at or above a capacity threshold
    Windows {
        /// Capacity threshold (0-100)
        #[arg(long)]
        threshold: f64,
    },
}

/// Energy model from config, falling back to the default circadian curve.
fn model() -> Result<EnergyModel, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if config.energy_curve.is_empty() {
        Ok(EnergyModel::default())
    } else {
        Ok(EnergyModel::with_curve(config.energy_curve))
    }
}

pub fn run(action: EnergyAction) -> Result<(), Box<dyn std::error::Error>> {
    let model = model()?;
    match action {
        EnergyAction::Show => {
            println!("{}", model.render_ascii_chart());
        }
        EnergyAction::Peak => match model.peak() {
            Some(peak) => println!(
                "Peak energy: {:02}:00 (capacity {:.0})",
                peak.hour, peak.capacity
            ),
            None => println!("Energy curve is empty."),
        },
        EnergyAction::DeepWork => {
            print_hours("Deep work windows", &model.deep_work_windows());
        }
        EnergyAction::Windows { threshold } => {
            print_hours(
                &format!("Hours at or above {threshold:.0}"),
                &model.windows_at_or_above(threshold),
            );
        }
    }
    Ok(())
}

fn print_hours(label: &str, hours: &[u8]) {
    if hours.is_empty() {
        println!("{label}: none");
        return;
    }
    let formatted: Vec<String> = hours.iter().map(|h| format!("{h:02}:00")).collect();
    println!("{label}: {}", formatted.join(", "));
}
