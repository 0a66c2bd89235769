fn main() {
    ruletree::cli::run();
}
