//! The supported C++ subset: its LL(1) grammar, authored FIRST sets, and
//! the declaration lookup over parse trees.

use crate::tree::{NodeId, ParseTree};
use crate::{ConstGrammar, FirstDef, RuleDef, Symbol, Token, TokenKind, EPS};

/// The fixed grammar of the supported subset.
///
/// ```grammar
/// Start      := S N M
/// S          := #include < iostream > S | ε
/// N          := using namespace std ; | ε
/// M          := int main ( ) { T V }
/// T          := Id T | L T | Loop T | Input T | Output T | ε
/// Id         := int L | float L
/// L          := identifier Assign Z
/// Z          := , identifier Assign Z | ;
/// Operation  := number P | identifier P
/// P          := O W P | ε
/// O          := + | - | *
/// W          := number | identifier
/// Assign     := = Operation | ε
/// Expression := Operation K Operation
/// K          := == | >= | <= | != | > | <
/// Loop       := while ( Expression ) { T }
/// Input      := cin >> identifier F ;
/// F          := >> identifier F | ε
/// Output     := cout << C H ;
/// H          := << C H | ε
/// C          := number | string | identifier
/// V          := return integer ; | ε
/// ```
///
/// `identifier`, `number`, `integer` and `string` are generic terminals
/// matched against token kinds; everything else is matched against the
/// lexeme. The `number` terminal also accepts integer tokens in value
/// positions, while `return` insists on an integer literal.
pub const CPP_GRAMMAR: ConstGrammar<'static, 58, 47, 22> = ConstGrammar::new(
    [
        Symbol::eos(),
        Symbol::epsilon(),
        Symbol::kind_term("identifier"),
        Symbol::kind_term("number"),
        Symbol::kind_term("integer"),
        Symbol::kind_term("string"),
        Symbol::term("#include"),
        Symbol::term("iostream"),
        Symbol::term("using"),
        Symbol::term("namespace"),
        Symbol::term("std"),
        Symbol::term("int"),
        Symbol::term("float"),
        Symbol::term("main"),
        Symbol::term("return"),
        Symbol::term("while"),
        Symbol::term("cin"),
        Symbol::term("cout"),
        Symbol::term("("),
        Symbol::term(")"),
        Symbol::term("{"),
        Symbol::term("}"),
        Symbol::term(";"),
        Symbol::term(","),
        Symbol::term("="),
        Symbol::term("+"),
        Symbol::term("-"),
        Symbol::term("*"),
        Symbol::term("=="),
        Symbol::term(">="),
        Symbol::term("<="),
        Symbol::term("!="),
        Symbol::term(">"),
        Symbol::term("<"),
        Symbol::term(">>"),
        Symbol::term("<<"),
        Symbol::nterm("Start"),
        Symbol::nterm("S"),
        Symbol::nterm("N"),
        Symbol::nterm("M"),
        Symbol::nterm("T"),
        Symbol::nterm("Id"),
        Symbol::nterm("L"),
        Symbol::nterm("Z"),
        Symbol::nterm("Operation"),
        Symbol::nterm("P"),
        Symbol::nterm("O"),
        Symbol::nterm("W"),
        Symbol::nterm("Assign"),
        Symbol::nterm("Expression"),
        Symbol::nterm("K"),
        Symbol::nterm("Loop"),
        Symbol::nterm("Input"),
        Symbol::nterm("Output"),
        Symbol::nterm("F"),
        Symbol::nterm("H"),
        Symbol::nterm("C"),
        Symbol::nterm("V"),
    ],
    [
        RuleDef::new("Start", &["S", "N", "M"]),
        RuleDef::new("S", &["#include", "<", "iostream", ">", "S"]),
        RuleDef::new("S", &[EPS]),
        RuleDef::new("N", &["using", "namespace", "std", ";"]),
        RuleDef::new("N", &[EPS]),
        RuleDef::new("M", &["int", "main", "(", ")", "{", "T", "V", "}"]),
        RuleDef::new("T", &["Id", "T"]),
        RuleDef::new("T", &["L", "T"]),
        RuleDef::new("T", &["Loop", "T"]),
        RuleDef::new("T", &["Input", "T"]),
        RuleDef::new("T", &["Output", "T"]),
        RuleDef::new("T", &[EPS]),
        RuleDef::new("Id", &["int", "L"]),
        RuleDef::new("Id", &["float", "L"]),
        RuleDef::new("L", &["identifier", "Assign", "Z"]),
        RuleDef::new("Z", &[",", "identifier", "Assign", "Z"]),
        RuleDef::new("Z", &[";"]),
        RuleDef::new("Operation", &["number", "P"]),
        RuleDef::new("Operation", &["identifier", "P"]),
        RuleDef::new("P", &["O", "W", "P"]),
        RuleDef::new("P", &[EPS]),
        RuleDef::new("O", &["+"]),
        RuleDef::new("O", &["-"]),
        RuleDef::new("O", &["*"]),
        RuleDef::new("W", &["number"]),
        RuleDef::new("W", &["identifier"]),
        RuleDef::new("Assign", &["=", "Operation"]),
        RuleDef::new("Assign", &[EPS]),
        RuleDef::new("Expression", &["Operation", "K", "Operation"]),
        RuleDef::new("K", &["=="]),
        RuleDef::new("K", &[">="]),
        RuleDef::new("K", &["<="]),
        RuleDef::new("K", &["!="]),
        RuleDef::new("K", &[">"]),
        RuleDef::new("K", &["<"]),
        RuleDef::new("Loop", &["while", "(", "Expression", ")", "{", "T", "}"]),
        RuleDef::new("Input", &["cin", ">>", "identifier", "F", ";"]),
        RuleDef::new("F", &[">>", "identifier", "F"]),
        RuleDef::new("F", &[EPS]),
        RuleDef::new("Output", &["cout", "<<", "C", "H", ";"]),
        RuleDef::new("H", &["<<", "C", "H"]),
        RuleDef::new("H", &[EPS]),
        RuleDef::new("C", &["number"]),
        RuleDef::new("C", &["string"]),
        RuleDef::new("C", &["identifier"]),
        RuleDef::new("V", &["return", "integer", ";"]),
        RuleDef::new("V", &[EPS]),
    ],
    [
        FirstDef::new("Start", &["#include", "using", "int"]),
        FirstDef::new("S", &["#include", EPS]),
        FirstDef::new("N", &["using", EPS]),
        FirstDef::new("M", &["int"]),
        FirstDef::new("T", &["int", "float", "identifier", "while", "cin", "cout", EPS]),
        FirstDef::new("Id", &["int", "float"]),
        FirstDef::new("L", &["identifier"]),
        FirstDef::new("Z", &[",", ";"]),
        FirstDef::new("Operation", &["number", "identifier"]),
        FirstDef::new("P", &["+", "-", "*", EPS]),
        FirstDef::new("O", &["+", "-", "*"]),
        FirstDef::new("W", &["number", "identifier"]),
        FirstDef::new("Assign", &["=", EPS]),
        FirstDef::new("Expression", &["number", "identifier"]),
        FirstDef::new("K", &["==", ">=", "<=", "!=", ">", "<"]),
        FirstDef::new("Loop", &["while"]),
        FirstDef::new("Input", &["cin"]),
        FirstDef::new("Output", &["cout"]),
        FirstDef::new("F", &[">>", EPS]),
        FirstDef::new("H", &["<<", EPS]),
        FirstDef::new("C", &["number", "string", "identifier"]),
        FirstDef::new("V", &["return", EPS]),
    ],
);

/// Breadth-first search for the declaration node of `name`.
///
/// Declarators live under an `Id` expansion (`int L` / `float L`): the
/// `L` node introduces the first identifier, each comma-form `Z` node one
/// more. The first matching declarator wins; shadowing and redeclaration
/// are not modeled.
pub fn find_declaration(tree: &ParseTree<'_>, name: &str) -> Option<NodeId> {
    tree.iter_breadth_first()
        .filter(|&id| {
            let node = tree.node(id);
            !node.is_terminal() && node.symbol == "Id"
        })
        .find_map(|id| find_declarator(tree, id, name))
}

fn find_declarator(tree: &ParseTree<'_>, id_node: NodeId, name: &str) -> Option<NodeId> {
    // Id -> int L | float L : child 1 starts the declarator chain.
    let mut at = *tree.node(id_node).children.get(1)?;

    loop {
        let node = tree.node(at);

        // L -> identifier Assign Z ; Z -> , identifier Assign Z
        let ident_index = if node.symbol == "L" { 0 } else { 1 };
        let ident = *node.children.get(ident_index)?;

        if tree.node(ident).lexeme == name {
            return Some(at);
        }

        let tail = *node.children.last()?;
        if tree.node(tail).children.len() < 2 {
            // Z -> ; closes the chain.
            return None;
        }
        at = tail;
    }
}

/// Reconstruct the defining statement of `name` from the parse tree, with
/// the declared type inferred from the raw token sequence. `None` means
/// the identifier is not declared.
pub fn declaration_statement(
    tree: &ParseTree<'_>,
    name: &str,
    tokens: &[Token],
) -> Option<String> {
    let declarator = find_declaration(tree, name)?;

    let mut leaves = tree.subtree_leaves(declarator);
    if leaves.first() == Some(&",") {
        leaves.remove(0);
    }
    let statement = leaves.join(" ");

    match declared_type(tokens, name) {
        Some(declared) => Some(format!("{} {}", declared, statement)),
        None => Some(statement),
    }
}

/// Scan the token sequence for the type keyword governing `name`: walk
/// backwards from an occurrence of the identifier, skipping over
/// declarator-list tokens, until an `int`/`float` keyword is found.
fn declared_type<'a>(tokens: &'a [Token], name: &str) -> Option<&'a str> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| token.kind == TokenKind::Identifier && token.lexeme == name)
        .find_map(|(at, _)| {
            for token in tokens[..at].iter().rev() {
                match token.kind {
                    TokenKind::ReservedWord
                        if token.lexeme == "int" || token.lexeme == "float" =>
                    {
                        return Some(token.lexeme.as_str())
                    }
                    TokenKind::Identifier
                    | TokenKind::Number
                    | TokenKind::Integer
                    | TokenKind::StringLiteral => {}
                    TokenKind::Symbol
                        if matches!(token.lexeme.as_str(), "," | "=" | "+" | "-" | "*") => {}
                    _ => return None,
                }
            }
            None
        })
}

#[cfg(test)]
mod tests {
    use super::{declaration_statement, find_declaration, CPP_GRAMMAR};
    use crate::lexer::tokenize;
    use crate::traits::Grammar as _;
    use crate::{LlParser, LlTable, ParseTree, Token};

    fn parse(source: &str) -> (ParseTree<'static>, Vec<Token>) {
        let tokens = tokenize(source).unwrap();
        let table = LlTable::build(&CPP_GRAMMAR).expect("cannot build table");
        let parser = LlParser::new(&CPP_GRAMMAR, &table);
        let tree = parser.parse(&tokens).expect("parse failed");
        (tree, tokens)
    }

    #[test]
    fn test_001_grammar_is_consistent() {
        assert!(CPP_GRAMMAR.validate().is_ok());
    }

    #[test]
    fn test_002_grammar_is_ll1() {
        assert!(crate::LlTable::build(&CPP_GRAMMAR).is_ok());
    }

    #[test]
    fn test_003_find_single_declaration() {
        let (tree, _) = parse("int main() { int y; return 0; }");

        let node = find_declaration(&tree, "y").expect("y is declared");
        assert_eq!(tree.node(node).symbol, "L");
    }

    #[test]
    fn test_004_undeclared_identifier() {
        let (tree, _) = parse("int main() { int y; return 0; }");
        assert!(find_declaration(&tree, "z").is_none());
    }

    #[test]
    fn test_005_comma_chain_declarators() {
        let (tree, tokens) = parse("int main() { int a = 1, b = 2; }");

        let a = find_declaration(&tree, "a").expect("a is declared");
        assert_eq!(tree.node(a).symbol, "L");

        let b = find_declaration(&tree, "b").expect("b is declared");
        assert_eq!(tree.node(b).symbol, "Z");

        let statement = declaration_statement(&tree, "b", &tokens).unwrap();
        assert_eq!(statement, "int b = 2 ;");
    }

    #[test]
    fn test_006_statement_reconstruction_with_type() {
        let (tree, tokens) = parse("int main() { float x = 3.14; }");

        let statement = declaration_statement(&tree, "x", &tokens).unwrap();
        assert_eq!(statement, "float x = 3.14 ;");
    }

    #[test]
    fn test_007_initializer_identifiers_are_not_declarations() {
        let (tree, _) = parse("int main() { int y; int w = y; }");

        // y in w's initializer must not be mistaken for a declarator.
        let node = find_declaration(&tree, "y").expect("y is declared");
        let leaves = tree.subtree_leaves(node);
        assert_eq!(leaves, vec!["y", ";"]);
    }
}
