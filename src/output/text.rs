use crate::error::AppResult;

pub fn print_block(block: &str) -> AppResult<()> {
    println!("{}", block.trim_end());
    Ok(())
}
