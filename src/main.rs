use anyhow::{Context, Result};
use cardlist_to_sqlite::{
    cli::{Cli, Commands, ConvertArgs, LoadArgs},
    convert::convert_datasets,
    filter::resolve_datasets,
    schema::DatasetConfig,
    ui::{SilentUi, UiApp},
    writer::load_datasets,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command.unwrap_or_default() {
        Commands::Load(args) => run_load(args),

        Commands::Convert(args) => run_convert(args),

        Commands::ListDatasets => {
            let config = DatasetConfig::default();
            println!("Configured datasets:\n");
            for spec in config.datasets() {
                println!(
                    "  {:<4} {} -> table {}",
                    spec.tag,
                    config.input_path(spec).display(),
                    spec.table
                );
            }
            Ok(())
        }
    }
}

fn run_load(args: LoadArgs) -> Result<()> {
    let datasets = resolve_datasets(args.include, args.exclude)?;
    let config = DatasetConfig::new(&args.data_dir, &args.output_db, datasets)
        .context("Invalid dataset configuration")?;

    if !args.tui {
        load_datasets(&config, &mut SilentUi::new())
            .with_context(|| format!("Failed to load cards into {:?}", args.output_db))?;
        return Ok(());
    }

    let mut ui = UiApp::new()?;
    match load_datasets(&config, &mut ui) {
        Ok(summary) => ui.finish(&summary.to_string()),
        Err(err) => {
            ui.restore()?;
            Err(err).with_context(|| format!("Failed to load cards into {:?}", args.output_db))
        }
    }
}

fn run_convert(args: ConvertArgs) -> Result<()> {
    let datasets = resolve_datasets(args.include, args.exclude)?;
    let converted = convert_datasets(&args.data_dir, &datasets, &mut SilentUi::new())
        .with_context(|| format!("Failed to convert XML dumps in {:?}", args.data_dir))?;

    for stats in &converted {
        println!("{}", stats);
    }
    Ok(())
}
