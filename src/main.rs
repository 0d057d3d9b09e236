fn main() {
    qget::cli::run();
}
