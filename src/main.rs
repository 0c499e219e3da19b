//! fodctl - drive the FOD adapter by hand during device bring-up
//!
//! Uses the same controller the HAL library exports, with a vendor service
//! stand-in that only logs extCmd calls.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fod_inscreen::dim::dim_amount;
use fod_inscreen::{
    sysfs, FingerprintInscreen, FodConfig, FodController, LoggingVendor, MapProperties,
    PropertySource, SystemProperties,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "fodctl")]
#[command(about = "Inspect and exercise the in-display fingerprint adapter", long_about = None)]
struct Args {
    /// TOML file overriding the built-in device configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use this "X,Y" instead of the offset property
    #[arg(long)]
    offset: Option<String>,

    /// Use this "W,H" instead of the size property
    #[arg(long)]
    size: Option<String>,

    /// Enable verbose debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print sensor position and size
    Geometry,
    /// Print the dim amount for one brightness, or for all of them
    Dim {
        brightness: Option<i32>,
        #[arg(long)]
        table: bool,
    },
    /// Switch panel high brightness mode
    Hbm { state: Toggle },
    /// Show or hide the FOD view as seen by the touch driver
    View { state: Visibility },
    /// Press, hold, then release
    Press {
        #[arg(long, default_value_t = 500)]
        hold_ms: u64,
    },
    /// Drop the wake lock and leave FOD nit mode, e.g. after an interrupted press
    Release,
    /// Check whether an error/vendor code pair is swallowed
    Error { code: i32, vendor_code: i32 },
    /// Read back the control nodes
    Status,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Toggle {
    On,
    Off,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Visibility {
    Show,
    Hide,
}

fn main() -> Result<()> {
    let args = Args::parse();
    fod_inscreen::logging::init(args.debug);

    let config = match &args.config {
        Some(path) => FodConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => FodConfig::default(),
    };

    // Overrides replace the whole property tree
    let props: Box<dyn PropertySource> = if args.offset.is_some() || args.size.is_some() {
        let mut map = MapProperties::new();
        if let Some(offset) = &args.offset {
            map.set(config.sensor.offset_prop.clone(), offset.clone());
        }
        if let Some(size) = &args.size {
            map.set(config.sensor.size_prop.clone(), size.clone());
        }
        Box::new(map)
    } else {
        Box::new(SystemProperties)
    };

    let wake_lock = fod_inscreen::wakelock::SysfsWakeLock::from_config(&config.wake_lock);
    let fod = FodController::with_parts(config, LoggingVendor, props, wake_lock);

    match args.command {
        Command::Geometry => {
            let geometry = fod.geometry();
            println!("x={} y={} size={}", geometry.x, geometry.y, geometry.size);
        }
        Command::Dim { brightness, table } => {
            if table {
                for b in 0..=255 {
                    println!("{:3} {:3}", b, dim_amount(b));
                }
            } else if let Some(b) = brightness {
                println!("{}", fod.get_dim_amount(b));
            } else {
                bail!("dim needs a brightness or --table");
            }
        }
        Command::Hbm { state } => fod.switch_hbm(matches!(state, Toggle::On)),
        Command::View { state } => match state {
            Visibility::Show => fod.on_show_fod_view(),
            Visibility::Hide => fod.on_hide_fod_view(),
        },
        Command::Press { hold_ms } => {
            fod.on_press();
            info!("Holding for {}ms", hold_ms);
            thread::sleep(Duration::from_millis(hold_ms));
            fod.on_release();
        }
        Command::Release => {
            // A fresh process never took the lock, so the guard would skip it
            if !fod.release_wake_lock() {
                warn!("Failed to release wake lock {}", fod.config().wake_lock.name);
            }
            fod.on_release();
        }
        Command::Error { code, vendor_code } => {
            let handled = fod.handle_error(code, vendor_code);
            println!("{}", if handled { "handled" } else { "not handled" });
        }
        Command::Status => {
            let display = &fod.config().display;
            for (name, path) in [
                ("disp_param", &display.disp_param_path),
                ("fod_status", &display.fod_status_path),
            ] {
                let value = sysfs::read_value::<String>(path);
                println!("{}: {}", name, value.as_deref().unwrap_or("unavailable"));
            }
        }
    }

    Ok(())
}
