use stipulate::{
    Command, Enumeration, MaxLength, OptionArgument, Parameter, ValueType,
};

fn main() {
    let tag = Command::new("tag")
        .summary("Tag a release.")
        .add(
            Parameter::argument("name", ValueType::Text)
                .constraint(MaxLength::new(16))
                .description("The tag name."),
        )
        .expect("Invalid command line configuration");
    let bump = Command::new("bump")
        .summary("Bump the version.")
        .add(
            Parameter::option("part", Some('p'))
                .value(
                    OptionArgument::new("PART", ValueType::Text)
                        .constraint(
                            Enumeration::builder()
                                .value_ignore_case("major", "Incompatible changes.")
                                .value_ignore_case("minor", "Compatible features.")
                                .value_ignore_case("patch", "Compatible fixes.")
                                .build()
                                .expect("Invalid enumeration"),
                        )
                        .default("patch"),
                )
                .description("The version part to bump."),
        )
        .expect("Invalid command line configuration");

    let parser = Command::new("release")
        .summary("Manage releases.")
        .add(Parameter::option("dry-run", Some('n')).description("Don't change anything."))
        .and_then(|c| c.command(tag))
        .and_then(|c| c.command(bump))
        .expect("Invalid command line configuration")
        .build();

    let matches = parser.parse();
    let dry_run = matches.contains("dry-run");

    match matches.sub_command() {
        Some(("tag", tag)) => {
            println!("Tagging '{}' (dry-run: {dry_run}).", tag.get("name").unwrap());
        }
        Some(("bump", bump)) => {
            println!("Bumping '{}' (dry-run: {dry_run}).", bump.get("part").unwrap());
        }
        _ => unreachable!("the parser requires a known sub-command"),
    }
}
