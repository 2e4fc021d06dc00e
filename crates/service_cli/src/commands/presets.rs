//! Presets command implementation

use scenario_risk::PresetFamily;

use crate::Result;

/// Run the presets command
pub fn run() -> Result<()> {
    print!("{}", describe_presets()?);
    Ok(())
}

fn describe_presets() -> Result<String> {
    let mut out = String::new();
    for family in PresetFamily::all() {
        let set = family.build()?;
        out.push_str(&format!("{}: {}\n", family.name(), family.description()));
        for scenario in set.scenarios() {
            let probability = scenario
                .probability()
                .map(|p| format!(", p = {:.2}", p))
                .unwrap_or_default();
            out.push_str(&format!(
                "  - {} ({}{}): {}\n",
                scenario.name(),
                scenario.model(),
                probability,
                scenario.description().unwrap_or("")
            ));
        }
    }
    Ok(out)
}
