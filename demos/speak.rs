use std::path::PathBuf;
use std::time::Instant;

use formant_tts::{
    engines::formant::{FormantEngine, FormantSynthesisParams},
    SynthesisEngine,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hElo majti wurld".to_string());

    let mut engine = FormantEngine::new();

    let synth_start = Instant::now();
    let result = engine.synthesize(&text, None)?;
    let synth_dur = synth_start.elapsed();

    let audio_duration = result.duration_secs();
    println!(
        "Synthesized {:.2}s audio ({} samples) in {:.2?}",
        audio_duration,
        result.samples.len(),
        synth_dur
    );

    let out_path = PathBuf::from("speech.wav");
    result.write_wav(&out_path)?;
    println!("Saved to {}", out_path.display());

    // Same text again with seeded noise, for reproducible fricatives.
    let params = FormantSynthesisParams {
        seed: Some(1),
        ..Default::default()
    };
    engine.synthesize_to_file(&text, &PathBuf::from("speech-seeded.wav"), Some(params))?;
    println!("Saved seeded variant to speech-seeded.wav");

    Ok(())
}
