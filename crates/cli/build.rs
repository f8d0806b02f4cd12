use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("canvass")
        .version("0.1.0")
        .author("Canvass Contributors")
        .about("Extract course content from saved LMS pages")
        .arg(clap::arg!(<INPUT> "Local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(--"source-url" <URL> "Original page URL, used to tag the content type and course")
                .value_name("URL"),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"min-chars" <NUM> "Minimum acceptable body length in characters").default_value("50"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "canvass", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "canvass", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "canvass", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "canvass", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
