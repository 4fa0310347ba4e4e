fn main() {
    // Only the target build needs the ESP-IDF environment; host test builds
    // leave the optional embuild dependency out.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
