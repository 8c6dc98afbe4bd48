// End-to-end translation tests

use bastoc::emitter::Emitter;
use bastoc::parser::lexer::Lexer;
use bastoc::parser::parse::Parser;
use bastoc::translate;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn translate_demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    let source = fs::read_to_string(&path).expect("Failed to read demo file");
    translate(&source).expect("Translation failed")
}

#[test]
fn test_let_then_print() {
    let output = translate("LET x = 5\nPRINT x\n").unwrap();
    assert_eq!(
        output,
        concat!(
            "#include <stdio.h>\n",
            "\n",
            "int main() {\n",
            "   float x = (5);\n",
            "   printf(\"%.2f\\n\", (x));\n",
            "   \n",
            "\n",
            "}"
        )
    );
}

#[test]
fn test_nested_blocks() {
    let source = concat!(
        "LET a = 0\n",
        "WHILE a < 3 REPEAT\n",
        "IF a == 1 THEN\n",
        "PRINT \"one\"\n",
        "ENDIF\n",
        "LET a = a + 1\n",
        "ENDWHILE\n",
    );
    assert_eq!(
        translate(source).unwrap(),
        concat!(
            "#include <stdio.h>\n",
            "\n",
            "int main() {\n",
            "   float a = (0);\n",
            "   while ((a) < (3)) {\n",
            "      if ((a) == (1)){\n",
            "         printf(\"one\");\n",
            "      }\n",
            "      a = (a+1);\n",
            "   }\n",
            "   \n",
            "\n",
            "}"
        )
    );
}

#[test]
fn test_leading_comment_keeps_blank_line() {
    assert_eq!(
        translate("# hello\nLET a = 1\n").unwrap(),
        "#include <stdio.h>\n\nint main() {\n\n   float a = (1);\n   \n\n}"
    );
}

#[test]
fn test_comment_only_program() {
    let output = translate("# nothing to see\n\n").unwrap();
    assert!(output.starts_with("#include <stdio.h>\n\nint main() {\n"));
    assert!(output.ends_with("}"));
    assert!(!output.contains("float"));
}

#[test]
fn test_fib_demo() {
    assert_eq!(
        translate_demo("fib.bas"),
        concat!(
            "#include <stdio.h>\n",
            "\n",
            "int main() {\n",
            "\n",
            "   printf(\"How many fibonacci numbers do you want?\");\n",
            "   float nums;\n",
            "   scanf(\"%f\", &nums);\n",
            "   \n",
            "   float a = (0);\n",
            "   float b = (1);\n",
            "   while ((nums) > (0)) {\n",
            "      printf(\"%.2f\\n\", (a));\n",
            "      float c = (a+b);\n",
            "      a = (b);\n",
            "      b = (c);\n",
            "      nums = (nums-1);\n",
            "   }\n",
            "   \n",
            "\n",
            "}"
        )
    );
}

#[test]
fn test_countdown_demo() {
    assert_eq!(
        translate_demo("countdown.bas"),
        concat!(
            "#include <stdio.h>\n",
            "\n",
            "int main() {\n",
            "\n",
            "   float n = (3);\n",
            "   top:\n",
            "   if ((n) == (0)){\n",
            "      goto done;\n",
            "   }\n",
            "   printf(\"%.2f\\n\", (n));\n",
            "   n = (n-1);\n",
            "   goto top;\n",
            "   \n",
            "   done:\n",
            "   printf(\"liftoff\");\n",
            "   \n",
            "\n",
            "}"
        )
    );
}

#[test]
fn test_average_demo_declares_each_variable_once() {
    let output = translate_demo("average.bas");

    for name in ["total", "count", "x"] {
        let declarations = output
            .lines()
            .filter(|line| {
                let line = line.trim_start();
                line.starts_with(&format!("float {} ", name)) || line == format!("float {};", name)
            })
            .count();
        assert_eq!(declarations, 1, "declarations of {}", name);
    }
    assert_eq!(output.matches("float ").count(), 3);
    assert!(output.contains("printf(\"%.2f\\n\", (total/count));"));
    assert!(output.contains("while ((x) >= (0)) {"));
}

#[test]
fn test_declaration_precedes_first_use() {
    let output = translate_demo("average.bas");
    let declared = output.find("float x;").unwrap();
    let first_use = output.find("&x").unwrap();
    assert!(declared < first_use);
}

#[test]
fn test_translation_is_repeatable() {
    let source =
        fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/countdown.bas"))
            .unwrap();
    let first = translate(&source).unwrap();
    let second = translate(&source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parser_drives_caller_owned_emitter() {
    let mut emitter = Emitter::new();
    emitter.header_line("/* generated */");

    let parser =
        Parser::new(Lexer::new("LET y = 2\n"), &mut emitter).expect("Parser creation failed");
    parser.program().expect("Parsing failed");

    let output = emitter.output();
    assert!(output.starts_with("/* generated */\n#include <stdio.h>\n\nint main() {\n"));
    assert_eq!(emitter.tab_depth(), 0);
}

#[test]
fn test_emitter_writes_translation() {
    let path = std::env::temp_dir().join(format!("bastoc-it-{}.c", std::process::id()));

    let mut emitter = Emitter::new();
    let parser = Parser::new(Lexer::new("PRINT \"hi\"\n"), &mut emitter).unwrap();
    parser.program().unwrap();
    emitter.write(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(written, translate("PRINT \"hi\"\n").unwrap());
}
