use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the tab-separated section, in cue-log column order.
#[derive(Serialize)]
struct CueRow<'a> {
    #[serde(rename = "Event")]
    event: u32,
    #[serde(rename = "Reel")]
    reel: &'a str,
    #[serde(rename = "Clip")]
    clip: String,
    #[serde(rename = "SrcIn")]
    src_in: String,
    #[serde(rename = "MasDur")]
    mas_dur: String,
}

const HEADER: [&str; 5] = ["Event", "Reel", "Clip", "SrcIn", "MasDur"];
const FPS: u64 = 25;

/// Pick from `items` by a scrambled event number, so neighbours differ.
fn pick<'a>(items: &[&'a str], event: u32, stride: u32) -> &'a str {
    items[(event * stride) as usize % items.len()]
}

/// `HH:MM:SS:FF` at 25 fps.
fn timecode(frames: u64) -> String {
    let (secs, ff) = (frames / FPS, frames % FPS);
    format!(
        "{:02}:{:02}:{:02}:{:02}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        ff
    )
}

fn main() -> Result<()> {
    let output_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample_assemble_list.txt"));

    let reels = ["R1", "R2", "R3"];
    let libraries = ["Drums", "Bass", "Strings", "Ambience", "FX"];

    let mut file = File::create(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writeln!(file, "Title:\tSample Project")?;
    writeln!(file, "Date:\t2024-01-01")?;
    writeln!(file)?;
    writeln!(file, "Assemble List")?;
    writeln!(file, "--------------------------------------------")?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_writer(file);

    let mut record_in = 3600 * FPS;
    let mut rows = 0u32;
    for event in 1..=40u32 {
        // Page break: the header is repeated mid-file.
        if event == 21 {
            writer.write_record(HEADER)?;
        }

        let reel = pick(&reels, event, 1);
        // Every seventh event is a gap without a clip.
        let clip = if event % 7 == 0 {
            String::new()
        } else {
            let library = pick(&libraries, event, 3);
            format!("{library}_{:02}", event * 11 % 29 + 1)
        };
        // Between 2 and 90 seconds, frame-accurate.
        let length = 2 * FPS + u64::from(event) * 397 % (88 * FPS);

        writer
            .serialize(CueRow {
                event,
                reel,
                clip,
                src_in: timecode(record_in),
                mas_dur: timecode(length),
            })
            .with_context(|| format!("writing event {event}"))?;

        record_in += length;
        rows += 1;
    }
    writer.flush().context("flushing output")?;

    println!("Wrote {rows} cue events to {}", output_path.display());
    Ok(())
}
