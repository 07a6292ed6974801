fn main() -> Result<(), Box<dyn std::error::Error>> {
    viewinject_build::build!();

    Ok(())
}
