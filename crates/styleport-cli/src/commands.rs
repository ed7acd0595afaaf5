//! Subcommand implementations: file I/O, config loading, terminal output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use console::style;

use styleport_core::analyze::{analyze, validate};
use styleport_core::convert::{Conversion, ConvertOptions, convert};
use styleport_core::group::{NullClassifier, SignatureClassifier};
use styleport_core::mapping::{MappingConfig, MappingTable};
use styleport_core::parser::parse_css;

/// Load the mapping table, overlaying a user configuration file if given.
fn load_table(config: Option<&Path>) -> Result<MappingTable> {
    let Some(path) = config else {
        return Ok(MappingTable::with_defaults());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read mapping config {}", path.display()))?;
    let layer = MappingConfig::from_json(&text)?.into_layer()?;
    Ok(MappingTable::with_overlay(layer))
}

fn read_css(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))
}

pub fn run_convert(
    input: &Path,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    components: bool,
    no_variants: bool,
    utilities: bool,
) -> Result<()> {
    let table = load_table(config.as_deref())?;
    let options = ConvertOptions {
        group_components: components,
        split_modules: components,
        emit_variants: !no_variants,
        include_utilities: utilities,
    };

    if input.is_dir() {
        convert_directory(input, output, &table, &options)
    } else {
        convert_file(input, output, &table, &options)
    }
}

fn convert_file(
    input: &Path,
    output: Option<PathBuf>,
    table: &MappingTable,
    options: &ConvertOptions,
) -> Result<()> {
    let css = read_css(input)?;
    let conversion = convert(&css, table, options)
        .with_context(|| format!("conversion of {} failed", input.display()))?;

    print_warnings(&conversion);

    if conversion.units.is_empty() {
        println!("{} no convertible rules found", style("!").yellow());
        return Ok(());
    }

    if options.split_modules {
        let dir = output.unwrap_or_else(|| default_module_dir(input));
        write_units(&dir, &conversion)?;
        println!(
            "{} wrote {} modules to {}",
            style("✓").green(),
            conversion.units.len(),
            style(dir.display()).blue()
        );
    } else {
        let path = output.unwrap_or_else(|| input.with_extension("rs"));
        let unit = &conversion.units[0];
        fs::write(&path, &unit.source)
            .with_context(|| format!("could not write {}", path.display()))?;
        println!(
            "{} wrote {} ({} constructors)",
            style("✓").green(),
            style(path.display()).blue(),
            unit.source.matches("pub fn ").count()
        );
    }

    if let Some(framework) = conversion.detected_framework {
        println!("  detected framework: {framework}");
    }
    Ok(())
}

fn convert_directory(
    input: &Path,
    output: Option<PathBuf>,
    table: &MappingTable,
    options: &ConvertOptions,
) -> Result<()> {
    let out_dir = output.unwrap_or_else(|| input.join("rust_styles"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("could not create {}", out_dir.display()))?;

    let mut css_files: Vec<PathBuf> = fs::read_dir(input)
        .with_context(|| format!("could not read directory {}", input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "css"))
        .collect();
    css_files.sort();

    if css_files.is_empty() {
        bail!("no CSS files found in {}", input.display());
    }

    let mut failures = 0usize;
    for file in &css_files {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "styles".to_string());
        let target = if options.split_modules {
            out_dir.join(&stem)
        } else {
            out_dir.join(format!("{stem}.rs"))
        };
        match convert_file(file, Some(target), table, options) {
            Ok(()) => {}
            Err(err) => {
                failures += 1;
                eprintln!("{} {}: {err:#}", style("✗").red(), file.display());
            }
        }
    }

    let converted = css_files.len() - failures;
    println!(
        "{} converted {converted} of {} files into {}",
        style("✓").green(),
        css_files.len(),
        style(out_dir.display()).blue()
    );
    if failures > 0 {
        bail!("{failures} file(s) failed to convert");
    }
    Ok(())
}

fn write_units(dir: &Path, conversion: &Conversion) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;
    for unit in &conversion.units {
        let path = dir.join(unit.file_name());
        fs::write(&path, &unit.source)
            .with_context(|| format!("could not write {}", path.display()))?;
    }
    Ok(())
}

fn default_module_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "styles".to_string());
    input.with_file_name(stem)
}

fn print_warnings(conversion: &Conversion) {
    for warning in &conversion.parse_warnings {
        println!("{} {warning}", style("!").yellow());
    }
    for warning in &conversion.generate_warnings {
        println!("{} {warning}", style("!").yellow());
    }
}

pub fn run_analyze(css_file: &Path, config: Option<PathBuf>, json: bool) -> Result<()> {
    let css = read_css(css_file)?;
    let table = load_table(config.as_deref())?;
    let outcome = parse_css(&css)?;

    let report = match SignatureClassifier::for_stylesheet(&css) {
        Some(classifier) => analyze(&outcome.model, &table, &classifier),
        None => analyze(&outcome.model, &table, &NullClassifier),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", style(format!("Analysis: {}", css_file.display())).bold());
    println!("  rules:             {}", report.rules);
    println!("  unique selectors:  {}", report.unique_selectors);
    println!("  media rules:       {}", report.media_rules);
    println!("  pseudo rules:      {}", report.pseudo_rules);
    println!("  keyframes:         {}", report.keyframes);
    println!("  declarations:      {}", report.declarations);
    println!("  unique properties: {}", report.unique_properties);
    println!(
        "  mapping coverage:  {}/{} ({:.1}%)",
        report.mapped_values,
        report.total_values,
        report.coverage_percent()
    );
    for coverage in &report.coverage {
        println!(
            "    {:<12} {}/{} ({:.1}%)",
            coverage.category,
            coverage.mapped,
            coverage.total,
            coverage.percent()
        );
    }
    match &report.detected_framework {
        Some(framework) => println!("  framework:         {framework}"),
        None => println!("  framework:         none detected"),
    }
    println!("  components:");
    for (name, count) in &report.components {
        println!("    {name}: {count} rule(s)");
    }
    Ok(())
}

pub fn run_validate(css_file: &Path) -> Result<()> {
    let css = read_css(css_file)?;
    let outcome = parse_css(&css)?;

    let mut warnings: Vec<String> = outcome.warnings.iter().map(ToString::to_string).collect();
    warnings.extend(validate(&outcome.model));

    if warnings.is_empty() {
        println!("{} CSS file is ready for conversion", style("✓").green());
    } else {
        println!(
            "{} found {} potential issue(s):",
            style("!").yellow(),
            warnings.len()
        );
        for warning in &warnings {
            println!("  {} {warning}", style("•").yellow());
        }
    }
    Ok(())
}

pub fn run_preview(css: &str, components: bool, no_variants: bool) -> Result<()> {
    let options = ConvertOptions {
        group_components: components,
        emit_variants: !no_variants,
        ..Default::default()
    };
    let conversion = convert(css, &MappingTable::with_defaults(), &options)?;
    print_warnings(&conversion);

    if conversion.units.is_empty() {
        println!("{} no constructors generated", style("!").yellow());
        return Ok(());
    }
    for unit in &conversion.units {
        println!("{}", unit.source);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("button.css");
        fs::write(&input, ".btn { background: #007bff; }").unwrap();

        run_convert(&input, None, None, false, false, false).unwrap();

        let output = dir.path().join("button.rs");
        let source = fs::read_to_string(output).unwrap();
        assert!(source.contains("pub fn btn() -> Style"));
        assert!(source.contains("var(--color-primary)"));
    }

    #[test]
    fn convert_components_writes_module_tree() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("site.css");
        fs::write(&input, ".btn { color: red; } .card { padding: 16px; }").unwrap();

        run_convert(&input, None, None, true, false, false).unwrap();

        let module_dir = dir.path().join("site");
        assert!(module_dir.join("btn.rs").exists());
        assert!(module_dir.join("card.rs").exists());
        assert!(module_dir.join("mod.rs").exists());
    }

    #[test]
    fn convert_directory_processes_all_css() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.css"), ".a { color: red; }").unwrap();
        fs::write(dir.path().join("b.css"), ".b { color: blue; }").unwrap();
        fs::write(dir.path().join("ignored.txt"), "not css").unwrap();

        run_convert(dir.path(), None, None, false, false, false).unwrap();

        let out = dir.path().join("rust_styles");
        assert!(out.join("a.rs").exists());
        assert!(out.join("b.rs").exists());
    }

    #[test]
    fn convert_surfaces_fatal_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.css");
        fs::write(&input, ".broken {").unwrap();

        let err = run_convert(&input, None, None, false, false, false).unwrap_err();
        assert!(format!("{err:#}").contains("parse error"));
    }

    #[test]
    fn overlay_config_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("x.css");
        fs::write(&input, ".x { color: #007bff; }").unwrap();
        let config = dir.path().join("mappings.json");
        fs::write(&config, r##"{ "colors": { "#007bff": "var(--brand)" } }"##).unwrap();

        run_convert(&input, None, Some(config), false, false, false).unwrap();

        let source = fs::read_to_string(dir.path().join("x.rs")).unwrap();
        assert!(source.contains("var(--brand)"));
    }
}
