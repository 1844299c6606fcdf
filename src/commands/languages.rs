use medrag::languages::LANGUAGES;

pub fn run() {
    println!("\nSupported languages:");
    println!("====================");
    for lang in LANGUAGES {
        println!(
            "{}  {:<22} {:<12} {}",
            lang.flag, lang.name, lang.native_name, lang.code
        );
    }
}
