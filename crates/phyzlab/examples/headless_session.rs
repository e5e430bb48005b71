//! Drive a few experiments without a browser and print what they produce.
//!
//! ```sh
//! RUST_LOG=info cargo run -p phyzlab --example headless_session
//! ```

use phyzlab::{AuthContext, InMemoryCatalog, RuntimeConfig, Sample};

fn main() -> phyzlab::Result<()> {
    env_logger::init();

    let mut lab = phyzlab::lab(InMemoryCatalog::new(), RuntimeConfig::default())?
        .with_auth(AuthContext::signed_in("demo"));

    lab.open("pendulum")?;
    lab.update_param("length", 220.0)?;
    lab.start();
    for i in 0..180 {
        lab.frame(i as f64 * 1000.0 / 60.0);
    }
    println!("pendulum: {} samples", lab.samples().len());
    if let Some(Sample::Pendulum { time_ms, angle, .. }) = lab.samples().latest() {
        println!("  t = {time_ms:.0} ms, θ = {angle:.3} rad");
    }

    for ident in ["projectile", "lens-optics", "kirchhoff"] {
        lab.open(ident)?;
        if let Some(card) = lab.readout() {
            println!("{} ({})", card.title, card.formula);
            for q in &card.quantities {
                println!("  {:>14}: {}", q.label, q.display());
            }
        }
    }

    if let Some(attempt) = lab.session_attempt(3000.0) {
        println!("{}", attempt.to_json()?);
    }
    Ok(())
}
