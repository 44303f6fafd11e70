use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};
use mwdisplay_eeprom_tool::{
    hex_dump,
    EepromImage,
    IMAGE_SIZE,
};

#[derive(Parser)]
#[command(name = "mwdisplay-eeprom-tool")]
#[command(about = "MWDisplay EEPROM image generator, parser and dumper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an EEPROM image from a CSV file
    Generate {
        /// Input CSV file path
        input: PathBuf,

        /// Output image file path
        output: PathBuf,

        /// Image providing the reserved bytes and any field missing from the CSV
        #[arg(short, long)]
        base: Option<PathBuf>,
    },
    /// Parse an EEPROM image to a CSV file
    Parse {
        /// Input image file path
        input: PathBuf,

        /// Output CSV file path
        output: PathBuf,
    },
    /// Print a hex dump of an EEPROM image
    Dump {
        /// Input image file path
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            base,
        } => {
            println!("Parsing CSV file: {}", input.display());
            let image = EepromImage::from_csv_file(&input)?;
            println!("Found {} entries", image.entries.len());

            let base = base.map(std::fs::read).transpose()?;
            if base.is_some() {
                println!("Using base image for reserved bytes");
            }

            println!("Generating image...");
            image.generate_image_file(&output, base.as_deref())?;

            println!("Successfully generated EEPROM image: {}", output.display());
            println!("Size: {} bytes", IMAGE_SIZE);

            Ok(())
        }
        Commands::Parse { input, output } => {
            println!("Parsing image file: {}", input.display());
            let image = EepromImage::parse_image_file(&input)?;
            println!("Found {} entries", image.entries.len());

            println!("Writing CSV file...");
            image.to_csv_file(&output)?;

            println!("Successfully parsed EEPROM image to: {}", output.display());

            Ok(())
        }
        Commands::Dump { input } => {
            let data = std::fs::read(&input)?;
            print!("{}", hex_dump(&data)?);

            Ok(())
        }
    }
}
