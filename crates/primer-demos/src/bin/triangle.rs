use primer_demos::Demo;

fn main() {
    std::process::exit(primer_demos::run(Demo::triangle()));
}
