use tilecomp::{CombineConfig, combine_tiles};

fn main() -> anyhow::Result<()> {
    // Configuration is fixed at compile time; there are no flags to parse.
    let config = CombineConfig::default();

    let outcomes = combine_tiles(&config)?;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(path) => println!("tilecomp generated: {}", path.display()),
            Err(err) => eprintln!(
                "tilecomp error processing {}: {err}",
                outcome.file_name
            ),
        }
    }

    Ok(())
}
