use std::fs;
use std::thread;

use anyhow::Result;
use snippet_lang::classifier::{
    classify, get_rule_table, Classifier, DetectionSource, LabelStyle, RuleTable, RuleTableError,
    CODE_SENTINEL, TEXT_SENTINEL,
};
use snippet_lang::cli::detect::DetectCommand;
use snippet_lang::cli::OutputFormat;
use snippet_lang::config::ClassifierConfig;

/// Representative snippets paired with the language they should resolve to.
const SNIPPETS: &[(&str, &str)] = &[
    ("python", "def foo():\n    print('hi')"),
    (
        "java",
        "public class Foo { public static void main(String[] args) {} }",
    ),
    (
        "csharp",
        "using System;\n\nnamespace Demo\n{\n    class Program\n    {\n        static void Main(string[] args)\n        {\n            Console.WriteLine(\"Hi\");\n        }\n    }\n}\n",
    ),
    (
        "typescript",
        "interface User {\n  name: string;\n  age: number;\n}\n\nfunction greet(user: User): string {\n  return `Hello ${user.name}`;\n}\n",
    ),
    (
        "javascript",
        "const add = (a, b) => a + b;\nconsole.log(add(1, 2));\n",
    ),
    (
        "rust",
        "use std::collections::HashMap;\n\nfn main() {\n    let mut map = HashMap::new();\n    println!(\"{:?}\", map);\n}\n",
    ),
    (
        "go",
        "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tx := 42\n\tfmt.Println(x)\n}\n",
    ),
    (
        "cpp",
        "#include <iostream>\n\nint main() {\n    std::cout << \"hi\" << std::endl;\n    return 0;\n}\n",
    ),
    (
        "c",
        "#include <stdio.h>\n\nint main(void) {\n    printf(\"hi\\n\");\n    return 0;\n}\n",
    ),
    (
        "ruby",
        "class Greeter\n  attr_reader :name\n\n  def initialize(name)\n    @name = name\n  end\n\n  def greet\n    puts \"Hello #{name}\"\n  end\nend\n",
    ),
    ("php", "<?php\n$name = 'World';\necho \"Hello $name\";\n"),
    (
        "sql",
        "SELECT id, name FROM users WHERE age > 21 ORDER BY name;",
    ),
    (
        "html",
        "<!DOCTYPE html>\n<html>\n<body>\n  <div class=\"box\"><p>Hello</p></div>\n</body>\n</html>\n",
    ),
    ("css", ".card {\n  color: #333;\n  padding: 8px;\n}\n"),
    ("bash", "#!/bin/bash\nfor f in *.txt; do\n  echo \"$f\"\ndone\n"),
    (
        "json",
        "{\n  \"name\": \"demo\",\n  \"version\": 1,\n  \"tags\": [\"a\", \"b\"]\n}",
    ),
    ("yaml", "name: build\non:\n  push:\n    branches:\n      - main\n"),
];

#[test]
fn representative_snippets_resolve_to_their_language() {
    for (language, snippet) in SNIPPETS {
        let result = classify(snippet);
        assert_eq!(
            result.language,
            *language,
            "snippet for {language} was classified as {}",
            result.language
        );
        assert_eq!(result.source, DetectionSource::Scorer);
    }
}

#[test]
fn every_embedded_language_has_a_snippet() {
    for name in get_rule_table().names() {
        assert!(
            SNIPPETS.iter().any(|(language, _)| *language == name),
            "no snippet for {name}"
        );
    }
}

#[test]
fn java_is_not_mistaken_for_javascript() {
    let result = classify("public class Foo { public static void main(String[] args) {} }");
    assert_eq!(result.language, "java");
    assert_ne!(result.language, "javascript");
}

#[test]
fn single_number_falls_back_to_text() {
    let result = classify("42");
    assert_eq!(result.language, TEXT_SENTINEL);
    assert_eq!(result.source, DetectionSource::Fallback);
}

#[test]
fn code_like_punctuation_falls_back_to_code() {
    assert_eq!(classify("foo(bar);").language, CODE_SENTINEL);
    assert_eq!(classify("}").language, CODE_SENTINEL);
}

#[test]
fn fenced_tag_overrides_scoring() {
    let result = classify("```rs\nfn main() {}\n```");
    assert_eq!(result.language, "rust");
    assert_eq!(result.source, DetectionSource::Override);

    // The body is unmistakably Java, but the author said Python.
    let result = classify("```py\npublic static void main(String[] args) {}\n```");
    assert_eq!(result.language, "python");
}

#[test]
fn classification_is_idempotent() {
    for (_, snippet) in SNIPPETS {
        assert_eq!(classify(snippet), classify(snippet));
    }
}

#[test]
fn concurrent_classification_matches_serial() {
    let serial: Vec<String> = SNIPPETS
        .iter()
        .map(|(_, snippet)| classify(snippet).language)
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let classifier = Classifier::new();
                    SNIPPETS
                        .iter()
                        .map(|(_, snippet)| classifier.detect_language(snippet))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let parallel = handle.join().unwrap();
            assert_eq!(parallel, serial);
        }
    });
}

#[test]
fn custom_rule_file_drives_classification() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("rules.yaml");
    fs::write(
        &path,
        r"
languages:
  - name: fortran
    priority: 3
    signatures:
      - '(?im)^\s*program\s+\w+'
      - '(?im)^\s*end\s+program\b'
      - '(?i)\bimplicit\s+none\b'
  - name: basic
    priority: 1
    signatures:
      - '(?m)^\d+\s+PRINT\b'
    exclusions:
      - '(?i)\bimplicit\s+none\b'
",
    )?;

    let table = RuleTable::load_from_path(&path)?;
    let classifier = Classifier::with_table(&table).with_label_style(LabelStyle::Emphasized);

    let fortran = classifier.classify("program hello\n  implicit none\n  print *, 'hi'\nend program hello\n");
    assert_eq!(fortran.language, "fortran");
    assert_eq!(fortran.label, "✦ fortran");

    assert_eq!(classifier.detect_language("10 PRINT \"HI\"\n20 GOTO 10\n"), "basic");
    assert_eq!(classifier.detect_language("hello world"), TEXT_SENTINEL);
    Ok(())
}

#[test]
fn invalid_rule_files_report_the_defect() -> Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let cases = [
        (
            "duplicate.yaml",
            "languages:\n  - {name: a, priority: 1, signatures: ['x']}\n  - {name: a, priority: 1, signatures: ['y']}\n",
        ),
        (
            "priority.yaml",
            "languages:\n  - {name: a, priority: -1, signatures: ['x']}\n",
        ),
        (
            "pattern.yaml",
            "languages:\n  - {name: a, priority: 1, signatures: ['[unclosed']}\n",
        ),
        ("empty.yaml", "languages: []\n"),
    ];

    let mut errors = Vec::new();
    for (file, content) in cases {
        let path = temp_dir.path().join(file);
        fs::write(&path, content)?;
        errors.push(RuleTable::load_from_path(&path));
    }

    assert!(matches!(errors[0], Err(RuleTableError::DuplicateName(_))));
    assert!(matches!(
        errors[1],
        Err(RuleTableError::InvalidPriority { priority: -1, .. })
    ));
    assert!(matches!(errors[2], Err(RuleTableError::InvalidPattern { .. })));
    assert!(matches!(errors[3], Err(RuleTableError::Empty)));
    Ok(())
}

#[test]
fn detect_yaml_report_snapshot() -> Result<()> {
    let cmd = DetectCommand {
        file: None,
        format: OutputFormat::Yaml,
        rank: false,
        rules: None,
        emphasize: false,
        versions: false,
    };
    let output = cmd.run(
        &ClassifierConfig::default(),
        "stdin",
        "def foo():\n    print('hi')",
    )?;

    insta::assert_snapshot!(output, @r"
    input: stdin
    language: python
    label: Python
    detected_by: scorer
    ");
    Ok(())
}

#[test]
fn detect_text_report_with_rank_snapshot() -> Result<()> {
    let cmd = DetectCommand {
        file: None,
        format: OutputFormat::Text,
        rank: true,
        rules: None,
        emphasize: false,
        versions: false,
    };
    let output = cmd.run(
        &ClassifierConfig::default(),
        "stdin",
        "SELECT id, name FROM users WHERE age > 21 ORDER BY name;",
    )?;

    insta::assert_snapshot!(output, @r"
    SQL (sql)
      sql             6
    ");
    Ok(())
}

#[test]
fn detect_json_report_for_fence() -> Result<()> {
    let cmd = DetectCommand {
        file: None,
        format: OutputFormat::Json,
        rank: false,
        rules: None,
        emphasize: true,
        versions: false,
    };
    let config = ClassifierConfig {
        rules_file: None,
        label_style: LabelStyle::Emphasized,
    };
    let output = cmd.run(&config, "notes.md", "Fix:\n\n~~~ts\nlet x: number = 1;\n~~~\n")?;
    let value: serde_json::Value = serde_json::from_str(&output)?;

    assert_eq!(value["input"], "notes.md");
    assert_eq!(value["language"], "typescript");
    assert_eq!(value["label"], "✦ TypeScript");
    assert_eq!(value["detected_by"], "override");
    Ok(())
}

#[test]
fn help_all_lists_commands_and_languages() {
    use snippet_lang::cli::help::HelpGenerator;

    let help_output = HelpGenerator::new().generate_all_help();
    assert!(help_output.starts_with("snippet-lang - Detects the programming language"));
    assert!(help_output.contains("snippet-lang detect - Detects the language of a file or stdin"));
    assert!(help_output.contains("snippet-lang rules check - Validates a custom rule document"));
    assert!(help_output.contains("--versions"));
    for name in get_rule_table().names() {
        assert!(help_output.contains(&format!("  {name:<12} ")), "{name} missing");
    }
}
