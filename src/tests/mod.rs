mod command_tests;
mod tokenizer_tests;
