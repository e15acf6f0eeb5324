use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use gsf::config::GSFConfig;
use gsf::gsf_optimizer::GSFOptimizer;
use gsf::io;
use gsf::io::cli::Cli;
use gsf::io::output::GSFOutput;
use log::{error, info, warn};
use polyplan::io::export::export_plan;
use polyplan::io::svg::plan_to_svg;
use rayon::prelude::*;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            GSFConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    config.validate().context("invalid config file")?;

    info!("[MAIN] Successfully parsed GSFConfig: {config:?}");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    //requests are independent, each one owns its own layout
    let n_failed = args
        .input_file
        .par_iter()
        .map(|input_file| {
            main_plan(input_file, &config, &args.solution_folder).inspect_err(|e| {
                error!("[MAIN] {} failed: {e:#}", input_file.display());
            })
        })
        .filter(|res| res.is_err())
        .count();

    if n_failed > 0 {
        bail!("{n_failed} of {} request(s) failed", args.input_file.len());
    }
    Ok(())
}

fn main_plan(input_file: &Path, config: &GSFConfig, output_folder: &Path) -> Result<()> {
    let input_stem = input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid input file name: {}", input_file.display()))?;

    let request = io::read_request(input_file)?;
    let mut optimizer = GSFOptimizer::from_request(&request, config.clone())?;
    let solution = optimizer.solve()?;

    let name = match request.name.is_empty() {
        true => input_stem.to_string(),
        false => request.name.clone(),
    };

    {
        let output = GSFOutput {
            solution: export_plan(&name, &solution, &optimizer.layout.land.projection),
            request,
            config: optimizer.config.clone(),
        };
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    {
        let svg_path = output_folder.join(format!("sol_{input_stem}.svg"));
        let svg = plan_to_svg(
            &optimizer.layout,
            &solution,
            optimizer.config.svg_draw_options,
            &name,
        );
        io::write_svg(&svg, &svg_path)?;
    }

    Ok(())
}
