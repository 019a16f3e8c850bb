use stipulate::{Command, MinValue, Parameter, Value, ValueType};

fn main() {
    let parser = Command::new("summer")
        .summary("Sum the items.")
        .add(
            Parameter::argument("item", ValueType::Integer)
                .constraint(MinValue::new(0))
                .repeated()
                .description("The items to sum."),
        )
        .expect("Invalid command line configuration")
        .build();

    let matches = parser.parse();
    let sum: i64 = matches
        .get_all("item")
        .iter()
        .map(|value| match value {
            Value::Integer(i) => *i,
            _ => unreachable!("item is declared as an integer"),
        })
        .sum();
    println!("Sum: {sum}");
}
