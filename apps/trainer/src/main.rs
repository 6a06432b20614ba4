fn main() -> anyhow::Result<()> {
    deutschsprint_trainer::run()
}
