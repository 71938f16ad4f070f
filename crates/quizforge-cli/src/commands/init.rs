//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("quizforge.toml", SAMPLE_CONFIG)?;
    write_if_missing("sample.txt", SAMPLE_TEXT)?;

    println!("\nNext steps:");
    println!("  1. Put your Gemini API key in .env as GEMINI_API_KEY=...");
    println!("  2. Run: quizforge take --file sample.txt --questions 3");
    println!("  3. Or try a single topic: quizforge take --text Photosynthesis");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

default_provider = "gemini"
default_model = "gemini-1.5-flash"
default_temperature = 0.7
max_tokens = 4096
default_difficulty = "intermediate"
default_question_count = 5
show_explanations = true
show_progress = true

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;

const SAMPLE_TEXT: &str = "\
The water cycle describes how water moves continuously between the oceans, \
the atmosphere and the land. Energy from the sun heats surface water, which \
evaporates and rises as water vapour. As the vapour climbs it cools and \
condenses around tiny particles of dust to form clouds. When the droplets in \
a cloud grow heavy enough they fall back to the surface as precipitation, \
such as rain, snow or hail. Some of that water runs off into rivers and \
lakes, some soaks into the ground to recharge aquifers, and some is taken up \
by plants and released again through transpiration. Over time the water \
returns to the oceans and the cycle begins again.
";
