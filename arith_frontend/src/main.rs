use arith_frontend::config::{self, RuntimeConfig};
use arith_frontend::pipeline::{self, CompileOutput, PipelineError};
use arith_frontend::utils::SourceMap;
use arith_frontend::{file_processor, logging};
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Default)]
struct Options {
    input: Option<Input>,
    config_path: Option<PathBuf>,
    json: bool,
    sexpr: bool,
    tokens: bool,
    help: bool,
}

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Expr(String),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("arith");

    let options = match parse_options(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <file> | --expr <text> [options]", program);
            eprintln!("       {} --help", program);
            process::exit(1);
        }
    };

    if options.help {
        print_help(program);
        return Ok(());
    }

    // Runtime preferences must be installed before the logger reads them
    let runtime = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Err(message) = logging::config::init_runtime_preferences(runtime.logging.clone())
        .and_then(|()| logging::init_global_logging())
    {
        logging::safe_log_error(logging::codes::system::INITIALIZATION_FAILURE, &message);
        process::exit(1);
    }

    let Some(input) = options.input.as_ref() else {
        eprintln!("Usage: {} <file> | --expr <text> [options]", program);
        process::exit(1);
    };

    let (source, result) = match input {
        Input::Expr(text) => (
            text.clone(),
            pipeline::compile_source_with_config(text, &runtime),
        ),
        Input::File(path) => match file_processor::process_file(path) {
            Ok(file) => {
                let result = pipeline::compile_source_file(&file, &runtime);
                (file.source, result)
            }
            Err(error) => (String::new(), Err(PipelineError::from(error))),
        },
    };

    match result {
        Ok(output) => print_output(&output, &options)?,
        Err(error) => {
            report_error(&error, &source, input);
            process::exit(1);
        }
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--sexpr" => options.sexpr = true,
            "--tokens" => options.tokens = true,
            "--expr" | "-e" => {
                i += 1;
                let text = args.get(i).ok_or("--expr requires an expression")?;
                set_input(&mut options, Input::Expr(text.clone()))?;
            }
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(path));
            }
            other if other.starts_with("--") => {
                return Err(format!("Unknown option: {}", other));
            }
            path => set_input(&mut options, Input::File(PathBuf::from(path)))?,
        }
        i += 1;
    }

    if options.input.is_none() && !options.help {
        return Err("No input given".to_string());
    }

    Ok(options)
}

fn set_input(options: &mut Options, input: Input) -> Result<(), String> {
    if options.input.is_some() {
        return Err("Only one input (a file or --expr) may be given".to_string());
    }
    options.input = Some(input);
    Ok(())
}

fn print_output(
    output: &CompileOutput,
    options: &Options,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.tokens {
        for token in &output.tokens {
            println!("{:>8}  {}", token.span.start.to_string(), token);
        }
    }

    if options.json {
        println!("{}", output.to_json()?);
        return Ok(());
    }

    if options.sexpr {
        println!("{}", output.ast.to_sexpr());
    } else {
        println!("{}", output.ast);
    }
    println!("= {}", output.value);

    Ok(())
}

fn report_error(error: &PipelineError, source: &str, input: &Input) {
    let origin = match input {
        Input::File(path) => path.display().to_string(),
        Input::Expr(_) => "<expr>".to_string(),
    };

    match error.span() {
        Some(span) => {
            let rendered = SourceMap::new(source).format_error(&span, &error.detail());
            eprint!("{}", rendered.replacen("  --> ", &format!("  --> {}:", origin), 1));
        }
        None => eprintln!("error: {}", error),
    }
    eprintln!("  = code: {}", error.error_code().as_str());
}

fn print_help(program_name: &str) {
    println!("Arithmetic front end v{}", env!("CARGO_PKG_VERSION"));
    println!("NFA-driven lexer and recursive-descent parser for arithmetic expressions");
    println!();
    println!("USAGE:");
    println!("    {} <file> [options]            # Compile a source file", program_name);
    println!("    {} --expr <text> [options]     # Compile an inline expression", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print the AST and statistics as JSON");
    println!("    --sexpr             Print the AST in prefix form");
    println!("    --tokens            List the significant tokens");
    println!("    --config <path>     Load runtime preferences from a TOML file");
    println!();
    println!("GRAMMAR:");
    println!("    T   -> F ( (+|-) F )*");
    println!("    F   -> Lit ( (*|/) Lit )*");
    println!("    Lit -> NUM | ( T )");
    println!("    NUM -> [0-9]*\\.[0-9]+");
    println!();
    println!("LIMITS:");
    println!(
        "    Max file size: {} bytes",
        file_processor::get_max_file_size()
    );
    println!(
        "    Max input length: {} chars",
        config::compile_time::lexical::MAX_INPUT_LENGTH
    );
    println!(
        "    Max nesting depth: {}",
        config::compile_time::syntax::MAX_PARSE_DEPTH
    );
    println!(
        "    Max expression depth: {}",
        config::compile_time::syntax::MAX_EXPRESSION_DEPTH
    );
    println!("    {}", config::build_info::source_info());
}
