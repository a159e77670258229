use std::error::Error;

use tex_worksheet::{persist_plan, sample, PreambleOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let assembler = persist_plan(
        &sample::handwriting_worksheet(),
        PreambleOptions::default(),
        "output.tex",
    )?;
    println!(
        "Generated output.tex ({} fragments, {} bytes)",
        assembler.fragment_count(),
        assembler.as_str().len()
    );
    Ok(())
}
