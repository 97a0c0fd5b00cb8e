#[cfg(test)]
mod common;
#[cfg(test)]
mod test_providers;
#[cfg(test)]
mod test_tokenizer;
