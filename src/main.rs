use loadwrk::error::AppResult;

fn main() -> AppResult<()> {
    loadwrk::entry::run()
}
