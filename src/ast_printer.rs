//! Indented tree dump of a parsed program, used by `--debug-parse`.

use crate::ast::{Expr, Stmt};

pub fn print(statements: &[Stmt]) {
    println!("AST Root");
    for stmt in statements {
        print_stmt(stmt, "");
    }
}

fn deeper(indent: &str) -> String {
    format!("{}  | ", indent)
}

fn print_stmt(stmt: &Stmt, indent: &str) {
    let child = deeper(indent);

    match stmt {
        Stmt::Class {
            name,
            superclass,
            methods,
        } => {
            match superclass {
                Some(superclass) => {
                    println!("{}[Class] {} < {}", indent, name.lexeme, superclass.lexeme)
                }
                None => println!("{}[Class] {}", indent, name.lexeme),
            }
            for method in methods {
                print_stmt(&Stmt::Function(method.clone()), &child);
            }
        }
        Stmt::Function(declaration) => {
            let params: Vec<&str> = declaration
                .params
                .iter()
                .map(|p| p.lexeme.as_str())
                .collect();
            println!("{}[Function] {}({})", indent, declaration.name.lexeme, params.join(", "));
            for stmt in &declaration.body {
                print_stmt(stmt, &child);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            println!("{}[If]", indent);
            println!("{}Condition:", child);
            print_expr(condition, &deeper(&child));
            println!("{}Then:", child);
            for stmt in then_branch {
                print_stmt(stmt, &deeper(&child));
            }
            if !else_branch.is_empty() {
                println!("{}Else:", child);
                for stmt in else_branch {
                    print_stmt(stmt, &deeper(&child));
                }
            }
        }
        Stmt::While { condition, body } => {
            println!("{}[While]", indent);
            println!("{}Condition:", child);
            print_expr(condition, &deeper(&child));
            println!("{}Body:", child);
            for stmt in body {
                print_stmt(stmt, &deeper(&child));
            }
        }
        Stmt::Return(value) => {
            println!("{}[Return]", indent);
            if let Some(value) = value {
                print_expr(value, &child);
            }
        }
        Stmt::Print(expr) => {
            println!("{}[Print]", indent);
            print_expr(expr, &child);
        }
        Stmt::Expression(expr) => {
            println!("{}[ExprStmt]", indent);
            print_expr(expr, &child);
        }
    }
}

fn print_expr(expr: &Expr, indent: &str) {
    let child = deeper(indent);

    match expr {
        Expr::Binary { left, op, right } => {
            println!("{}Binary ({})", indent, op.lexeme);
            print_expr(left, &child);
            print_expr(right, &child);
        }
        Expr::Assign { target, value } => {
            println!("{}Assign (=)", indent);
            println!("{}Target:", child);
            print_expr(target, &deeper(&child));
            println!("{}Value:", child);
            print_expr(value, &deeper(&child));
        }
        Expr::Literal(token) => {
            println!("{}Literal: {}", indent, token.lexeme);
        }
        Expr::Variable(name) => {
            println!("{}Var: {}", indent, name.lexeme);
        }
        Expr::Call { callee, args, .. } => {
            println!("{}Call", indent);
            println!("{}Callee:", child);
            print_expr(callee, &deeper(&child));
            println!("{}Args:", child);
            for arg in args {
                print_expr(arg, &deeper(&child));
            }
        }
        Expr::Get { object, name } => {
            println!("{}Get Property: .{}", indent, name.lexeme);
            print_expr(object, &child);
        }
        Expr::ArrayAccess { array, index, .. } => {
            println!("{}Array Index []", indent);
            println!("{}Array:", child);
            print_expr(array, &deeper(&child));
            println!("{}Index:", child);
            print_expr(index, &deeper(&child));
        }
        Expr::ArrayLit { elements, .. } => {
            println!("{}Array Literal []", indent);
            for element in elements {
                print_expr(element, &child);
            }
        }
        Expr::New { class_name, args } => {
            println!("{}New {}", indent, class_name.lexeme);
            for arg in args {
                print_expr(arg, &child);
            }
        }
    }
}
