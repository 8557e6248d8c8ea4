use tflags::{Flags, ParseOptions};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut flags = Flags::new();
    let (name, age, cool) = match register(&mut flags) {
        Ok(it) => it,
        Err(err) => err.exit(),
    };

    // A bad flag is reported, but whatever was parsed before it is still printed.
    let rest = match flags.parse_env(ParseOptions::default()) {
        Ok(tail) => std::env::args().skip(tail).collect::<Vec<_>>(),
        Err(err) => {
            eprintln!("{err}");
            Vec::new()
        }
    };

    println!("{} {} {}", flags[name], flags[age], flags[cool]);
    if !rest.is_empty() {
        println!("rest: {}", rest.join(" "));
    }
}

fn register(
    flags: &mut Flags,
) -> tflags::Result<(tflags::Flag<String>, tflags::Flag<i32>, tflags::Flag<bool>)> {
    let name = flags.set("name", "undefined", "specify your name")?;
    let age = flags.set("age", 0, "specify your age")?;
    let cool = flags.set("cool", false, "specify whether you're cool or not")?;
    Ok((name, age, cool))
}
