fn main() {
    voice_correction_lib::run()
}
