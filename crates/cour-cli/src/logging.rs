use anyhow::Result;

/// Install the global logger from the `[logging]` config table.
pub fn init(opts: &twyg::Opts) -> Result<()> {
    twyg::setup(opts.clone()).map_err(|e| anyhow::anyhow!("Could not set up logger: {e:?}"))?;
    log::debug!("Logger initialised at level {:?}", opts.level());
    Ok(())
}
