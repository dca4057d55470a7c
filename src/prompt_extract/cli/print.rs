use colored::Colorize;
use prompt_extract::error::ExtractError;
use prompt_extract::extract::Region;
use std::path::Path;

pub(super) fn print_selected(source: &Path) {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| source.to_string_lossy());
    println!("📄 Utilisation du fichier de log : {}", name);
}

pub(super) fn print_summary(output: &Path, regions: &[Region]) {
    println!(
        "{}",
        format!("✅ Fichier créé : {}", output.display()).green()
    );
    println!("   {} prompts extraits", regions.len());
    for region in regions {
        println!("   - {}", region.identifier);
    }
}

pub fn print_error(error: &ExtractError) {
    match error {
        ExtractError::NoInputFound { .. } => eprintln!("{}", format!("❌ {}", error).red()),
        _ => eprintln!("{}", format!("Error: {}", error).red()),
    }
}
